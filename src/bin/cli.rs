//! GLiDe CLI
//!
//! Command-line interface to the GLiDe dashboard:
//! - Show the team gamification view
//! - Browse leaderboards, metrics, players and achievements
//! - Update monitoring selections
//! - Manage the local session identifiers

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glide_dashboard::api::{AchievementCategory, DashboardClient, GamificationApi, Leaderboard};
use glide_dashboard::config::{generate_default_config, Config, LoggingConfig};
use glide_dashboard::gamification::{
    active_board, AchievementDialog, Badge, PlayerCard, TeamGamificationController,
    TeamGamificationView,
};
use glide_dashboard::session::{keys, FileSessionStore, GameScope, SessionStore};

#[derive(Parser)]
#[command(name = "glide")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "GLiDe gamified learning dashboard client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/glide/config.toml or ./glide.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// GLiDe API base URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage session identifiers
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    #[command(flatten)]
    Remote(RemoteCommand),
}

/// Commands answered by the GLiDe API
#[derive(Subcommand)]
pub enum RemoteCommand {
    /// Show the team gamification view for the session's players
    Team,

    /// List leaderboards of a subject edition (defaults from the session)
    Leaderboards {
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        course: Option<i32>,
        #[arg(long)]
        period: Option<String>,
    },

    /// Show one leaderboard
    Leaderboard { id: i64 },

    /// Show the results of a leaderboard
    Results { id: i64 },

    /// Current metrics
    Metrics {
        #[command(subcommand)]
        command: MetricsCommand,
    },

    /// Historical metrics
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Player information
    Player {
        #[command(subcommand)]
        command: PlayerCommand,
    },

    /// List individual players
    Users,

    /// List a player's badges
    Achievements {
        player: String,
        /// Show badges not attained yet
        #[arg(long)]
        missing: bool,
    },

    /// List evaluable actions
    Actions,

    /// Update monitoring selections
    Monitoring {
        #[command(subcommand)]
        command: MonitoringCommand,
    },

    /// Log in with an identity token and print the response headers
    Login {
        #[arg(long)]
        token: String,
    },

    /// List the players linked to an identity token
    Students {
        #[arg(long)]
        token: String,
    },
}

#[derive(Subcommand)]
pub enum MetricsCommand {
    /// Per-student metrics of a project
    Students {
        #[arg(short, long)]
        project: String,
    },
    /// Project-level metrics
    Current {
        #[arg(short, long)]
        project: String,
    },
    /// Metric categories used by a project
    Categories {
        #[arg(short, long)]
        project: String,
    },
    /// Every metric category
    AllCategories,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// Per-student metric history
    Students {
        #[arg(short, long)]
        project: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        from: String,
        /// End date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        to: String,
    },
    /// Project metric history
    Project {
        #[arg(short, long)]
        project: String,
        #[arg(long, value_parser = parse_date)]
        from: String,
        #[arg(long, value_parser = parse_date)]
        to: String,
    },
}

#[derive(Subcommand)]
pub enum PlayerCommand {
    /// Gamification summary
    Gamification { name: String },
    /// Monitoring selections
    Monitoring { name: String },
    /// Individual player profile
    Individual { name: String },
    /// Team player profile
    Team { name: String },
}

#[derive(Subcommand)]
pub enum MonitoringCommand {
    /// Set the selected metrics (comma-separated lists)
    Metrics {
        player: String,
        #[arg(long, default_value = "")]
        metrics: String,
        #[arg(long, default_value = "")]
        history: String,
        #[arg(long, default_value = "")]
        bar: String,
    },
    /// Set the selected date range
    Dates {
        player: String,
        #[arg(long, value_parser = parse_date)]
        start: String,
        #[arg(long, value_parser = parse_date)]
        end: String,
    },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Print every identifier
    Show,
    /// Set an identifier, e.g. `teamPlayername pes11a`
    Set { key: String, value: String },
    /// Remove an identifier
    Unset { key: String },
    /// Remove every identifier
    Clear,
}

fn parse_date(s: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);

    let format = cli.format;

    match cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }

        Commands::Session { command } => {
            let mut store = FileSessionStore::open(&config.session.path)?;
            run_session(&mut store, command, format)?;
        }

        Commands::Remote(command) => {
            let client = DashboardClient::new(&config.api)?;
            tracing::debug!(base_url = client.base_url(), "Using GLiDe API");
            run_remote(client, &config, command, format).await?;
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("glide_dashboard={0},glide={0}", config.level))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run_remote(
    client: DashboardClient,
    config: &Config,
    command: RemoteCommand,
    format: OutputFormat,
) -> Result<()> {
    match command {
        RemoteCommand::Team => {
            let session = FileSessionStore::open(&config.session.path)?;
            let client: Arc<dyn GamificationApi> = Arc::new(client);
            let mut controller = TeamGamificationController::new(client);

            if controller.activate(&session) == 0 {
                eprintln!("No players selected.");
                eprintln!();
                eprintln!("Pick them first with:");
                eprintln!("  glide session set {} <name>", keys::INDIVIDUAL_PLAYER);
                eprintln!("  glide session set {} <name>", keys::TEAM_PLAYER);
                std::process::exit(1);
            }
            controller.wait().await;

            let view = controller.snapshot().await;
            match format {
                OutputFormat::Json => print_json(&view)?,
                OutputFormat::Table => print_team_view(
                    &view,
                    &controller.open_achieved_dialog().await,
                    &controller.open_missing_dialog().await,
                ),
            }
        }

        RemoteCommand::Leaderboards {
            subject,
            course,
            period,
        } => {
            let session = FileSessionStore::open(&config.session.path)?;
            let scope = GameScope::read(&session);

            let subject = subject
                .or_else(|| scope.as_ref().map(|s| s.subject_acronym.clone()))
                .context("No --subject given and none in session")?;
            let course = course
                .or_else(|| scope.as_ref().map(|s| s.course))
                .context("No --course given and none in session")?;
            let period = period
                .or_else(|| scope.as_ref().map(|s| s.period.clone()))
                .context("No --period given and none in session")?;

            let boards = client.leaderboards(&subject, course, &period).await?;
            match format {
                OutputFormat::Json => print_json(&boards)?,
                OutputFormat::Table => print_leaderboards(&boards),
            }
        }

        RemoteCommand::Leaderboard { id } => {
            let board = client.leaderboard(id).await?;
            match format {
                OutputFormat::Json => print_json(&board)?,
                OutputFormat::Table => print_leaderboards(std::slice::from_ref(&board)),
            }
        }

        RemoteCommand::Results { id } => print_json(&client.leaderboard_results(id).await?)?,

        RemoteCommand::Metrics { command } => {
            let value = match command {
                MetricsCommand::Students { project } => client.student_metrics(&project).await?,
                MetricsCommand::Current { project } => client.project_metrics(&project).await?,
                MetricsCommand::Categories { project } => {
                    client.project_categories(&project).await?
                }
                MetricsCommand::AllCategories => client.all_categories().await?,
            };
            print_json(&value)?;
        }

        RemoteCommand::History { command } => {
            let value = match command {
                HistoryCommand::Students { project, from, to } => {
                    check_range(&from, &to)?;
                    client.student_metrics_history(&project, &from, &to).await?
                }
                HistoryCommand::Project { project, from, to } => {
                    check_range(&from, &to)?;
                    client.project_metrics_history(&project, &from, &to).await?
                }
            };
            print_json(&value)?;
        }

        RemoteCommand::Player { command } => match command {
            PlayerCommand::Gamification { name } => {
                print_json(&client.player_gamification(&name).await?)?
            }
            PlayerCommand::Monitoring { name } => {
                print_json(&client.selected_metrics(&name).await?)?
            }
            PlayerCommand::Individual { name } => {
                let card = PlayerCard::from(client.individual_player(&name).await?);
                print_player(&card, format)?;
            }
            PlayerCommand::Team { name } => {
                let card = PlayerCard::from(client.team_player(&name).await?);
                print_player(&card, format)?;
            }
        },

        RemoteCommand::Users => {
            let users = client.users().await?;
            match format {
                OutputFormat::Json => print_json(&users)?,
                OutputFormat::Table => {
                    if users.is_empty() {
                        println!("No players found.");
                    }
                    for user in users {
                        println!("{}", user["playername"].as_str().unwrap_or("-"));
                    }
                }
            }
        }

        RemoteCommand::Achievements { player, missing } => {
            let records = client
                .player_achievements(&player, !missing, AchievementCategory::Badges)
                .await?;
            let badges: Vec<Badge> = if missing {
                records.into_iter().map(Badge::not_attained).collect()
            } else {
                records.into_iter().map(Badge::attained).collect()
            };
            match format {
                OutputFormat::Json => print_json(&badges)?,
                OutputFormat::Table => print_badges(&badges),
            }
        }

        RemoteCommand::Actions => print_json(&client.evaluable_actions().await?)?,

        RemoteCommand::Monitoring { command } => match command {
            MonitoringCommand::Metrics {
                player,
                metrics,
                history,
                bar,
            } => {
                client
                    .update_selected_metrics(&player, &metrics, &history, &bar)
                    .await?;
                println!("Updated selected metrics of {}", player);
            }
            MonitoringCommand::Dates { player, start, end } => {
                check_range(&start, &end)?;
                client.update_selected_dates(&player, &start, &end).await?;
                println!("Updated selected dates of {}: {} to {}", player, start, end);
            }
        },

        RemoteCommand::Login { token } => {
            let response = client.login(&token).await?;
            match format {
                OutputFormat::Json => print_json(&response)?,
                OutputFormat::Table => {
                    println!("Status: {}", response.status);
                    println!();
                    println!("Headers:");
                    for (name, value) in &response.headers {
                        println!("  {}: {}", name, value);
                    }
                    if !response.body.is_null() {
                        println!();
                        println!("{}", serde_json::to_string_pretty(&response.body)?);
                    }
                }
            }
        }

        RemoteCommand::Students { token } => {
            let players = client.student_players(&token).await?;
            match format {
                OutputFormat::Json => print_json(&players)?,
                OutputFormat::Table => {
                    println!(
                        "{:<6} {:<20} {:<10} {:<8} {}",
                        "ID", "Player", "Subject", "Course", "Period"
                    );
                    println!("{}", "-".repeat(60));
                    for p in players {
                        println!(
                            "{:<6} {:<20} {:<10} {:<8} {}",
                            p.id, p.playername, p.game_subject_acronym, p.game_course, p.game_period
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

fn run_session(
    store: &mut FileSessionStore,
    command: SessionCommand,
    format: OutputFormat,
) -> Result<()> {
    match command {
        SessionCommand::Show => match format {
            OutputFormat::Json => print_json(&store.entries())?,
            OutputFormat::Table => {
                println!("Session file: {:?}", store.path());
                println!();
                for key in keys::ALL {
                    let value = store.get(key);
                    println!("{:<22} {}", key, value.as_deref().unwrap_or("(unset)"));
                }
                for (key, value) in &store.entries() {
                    if !keys::ALL.contains(&key.as_str()) {
                        println!("{:<22} {}", key, value);
                    }
                }
            }
        },
        SessionCommand::Set { key, value } => {
            if !keys::ALL.contains(&key.as_str()) {
                tracing::warn!(key = %key, "Setting a key no view reads");
            }
            if key == keys::COURSE && value.trim().parse::<i32>().is_err() {
                bail!("{} must be a number, got {:?}", keys::COURSE, value);
            }
            store.set(&key, &value)?;
            println!("{} = {}", key, value);
        }
        SessionCommand::Unset { key } => {
            store.remove(&key)?;
            println!("Removed {}", key);
        }
        SessionCommand::Clear => {
            store.clear()?;
            println!("Session cleared");
        }
    }
    Ok(())
}

fn check_range(start: &str, end: &str) -> Result<()> {
    if start > end {
        bail!("Start date {} is after end date {}", start, end);
    }
    Ok(())
}

// ============ Output ============

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_team_view(
    view: &TeamGamificationView,
    achieved: &AchievementDialog,
    missing: &AchievementDialog,
) {
    match &view.team_player {
        Some(team) => println!("Team: {}{}", team.name, image_note(team)),
        None => println!("Team: -"),
    }
    match &view.individual_player {
        Some(player) => println!("Player: {}{}", player.name, image_note(player)),
        None => println!("Player: -"),
    }

    println!();
    match &view.leaderboard {
        Some(board) => println!(
            "Leaderboard: #{} {}",
            board.id,
            board.name.as_deref().unwrap_or("(unnamed)")
        ),
        None if view.leaderboards.is_some() => println!("Leaderboard: no visible team leaderboard"),
        None => println!("Leaderboard: not loaded"),
    }

    for dialog in [achieved, missing] {
        println!();
        println!("{} ({})", dialog.title(), dialog.badges().len());
        if dialog.is_pending() {
            println!("  not loaded");
        } else {
            print_badges(dialog.badges());
        }
    }

    if !view.failures.is_empty() {
        println!();
        println!("Failed to load:");
        for failure in &view.failures {
            println!("  {}: {}", failure.fetch, failure.message);
        }
    }
}

fn image_note(card: &PlayerCard) -> String {
    card.image
        .as_ref()
        .map(|img| format!(" [image, {} bytes]", img.decoded_len()))
        .unwrap_or_default()
}

fn print_player(card: &PlayerCard, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(card)?,
        OutputFormat::Table => {
            println!("{}{}", card.name, image_note(card));
            for (key, value) in &card.details {
                println!("  {:<20} {}", key, value);
            }
        }
    }
    Ok(())
}

fn print_leaderboards(boards: &[Leaderboard]) {
    if boards.is_empty() {
        println!("No leaderboards found.");
        return;
    }

    let active = active_board(boards).map(|b| b.id);

    println!("{:<2} {:<6} {:<30} {:<12} {}", "", "ID", "Name", "Level", "Visible");
    println!("{}", "-".repeat(60));
    for board in boards {
        println!(
            "{:<2} {:<6} {:<30} {:<12} {}",
            if Some(board.id) == active { "*" } else { "" },
            board.id,
            board.name.as_deref().unwrap_or("-"),
            format!("{:?}", board.assessment_level),
            if board.student_visible { "yes" } else { "no" }
        );
    }
}

fn print_badges(badges: &[Badge]) {
    if badges.is_empty() {
        println!("  (none)");
        return;
    }

    println!("  {:<30} {:<12} {}", "Name", "Date", "Units");
    for badge in badges {
        println!("  {:<30} {:<12} {}", badge.name, badge.date, badge.units);
    }
}
