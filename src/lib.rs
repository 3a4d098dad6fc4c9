//! # GLiDe Dashboard
//!
//! Client side of the GLiDe gamified learning dashboard: a typed client for
//! the GLiDe REST API and the read models behind the dashboard views.
//!
//! ## Modules
//!
//! - [`api`]: Endpoint catalogue, typed records and the HTTP client
//! - [`session`]: Session identifiers chosen earlier in the user flow
//! - [`gamification`]: Team gamification view, controller and dialogs
//! - [`config`]: TOML configuration with environment overrides
//!
//! Without the default `native` feature only the platform-independent parts
//! are built (request descriptions, records, view state), which is what the
//! browser frontend uses.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glide_dashboard::api::DashboardClient;
//! use glide_dashboard::config::Config;
//! use glide_dashboard::gamification::TeamGamificationController;
//! use glide_dashboard::session::FileSessionStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = Arc::new(DashboardClient::new(&config.api)?);
//!     let session = FileSessionStore::open(&config.session.path)?;
//!
//!     let mut controller = TeamGamificationController::new(client);
//!     controller.activate(&session);
//!     controller.wait().await;
//!
//!     let view = controller.snapshot().await;
//!     println!("{} badges attained", view.attained_badges.map_or(0, |b| b.len()));
//!     Ok(())
//! }
//! ```

pub mod api;
#[cfg(feature = "native")]
pub mod config;
pub mod gamification;
pub mod session;

// Re-export top-level types for convenience
pub use api::{
    AchievementCategory, AchievementRecord, ApiRequest, AssessmentLevel, ClientError,
    ClientResult, IndividualPlayer, Leaderboard, LoginResponse, StudentPlayer, TeamPlayer,
};

#[cfg(feature = "native")]
pub use api::{DashboardClient, GamificationApi};

pub use gamification::{
    AchievementDialog, Badge, DialogKind, Fetch, FetchFailure, ImageResource, PlayerCard,
    TeamGamificationView,
};

#[cfg(feature = "native")]
pub use gamification::TeamGamificationController;

pub use session::{GameScope, MemorySessionStore, SessionError, SessionStore, TeamSession};

#[cfg(feature = "native")]
pub use session::FileSessionStore;

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
