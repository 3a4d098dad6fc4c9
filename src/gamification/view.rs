//! Team Gamification View State
//!
//! State of the team gamification page and the handlers that fold each
//! API response into it. Responses may arrive in any order and any subset
//! may fail; every handler touches only its own fields.
//!
//! The leaderboard request needs a complete subject edition (acronym,
//! numeric course and period). A session without one issues no leaderboard
//! request at all rather than one with empty parameters; the other four
//! fetches still run and `leaderboards` stays `None`.

use serde::Serialize;
use std::fmt;

use super::badges::{Badge, ImageResource};
use super::dialog::{AchievementDialog, DialogKind};
use super::leaderboard::visible_team_boards;
use crate::api::dto::ExtraFields;
use crate::api::{AchievementRecord, IndividualPlayer, Leaderboard, TeamPlayer};
use crate::session::TeamSession;

/// One of the independent fetches behind the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fetch {
    Leaderboards,
    IndividualPlayer,
    TeamPlayer,
    AttainedBadges,
    MissingBadges,
}

impl fmt::Display for Fetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Fetch::Leaderboards => "leaderboards",
            Fetch::IndividualPlayer => "individual player",
            Fetch::TeamPlayer => "team player",
            Fetch::AttainedBadges => "attained badges",
            Fetch::MissingBadges => "missing badges",
        };
        f.write_str(name)
    }
}

/// Fetches to issue for a session
///
/// The leaderboard fetch needs the subject edition; the others only need
/// the player names.
pub fn fetch_plan(session: &TeamSession) -> Vec<Fetch> {
    let mut plan = Vec::with_capacity(5);
    if session.scope.is_some() {
        plan.push(Fetch::Leaderboards);
    } else {
        tracing::warn!("Session has no subject edition, skipping leaderboards");
    }
    plan.extend([
        Fetch::IndividualPlayer,
        Fetch::TeamPlayer,
        Fetch::AttainedBadges,
        Fetch::MissingBadges,
    ]);
    plan
}

/// A fetch that did not produce data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub fetch: Fetch,
    pub message: String,
}

/// Player profile ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerCard {
    pub name: String,
    pub image: Option<ImageResource>,
    /// Remaining profile fields, untouched
    pub details: ExtraFields,
}

impl From<IndividualPlayer> for PlayerCard {
    fn from(player: IndividualPlayer) -> Self {
        Self {
            image: ImageResource::from_payload(player.avatar.as_deref()),
            name: player.playername,
            details: player.extra,
        }
    }
}

impl From<TeamPlayer> for PlayerCard {
    fn from(player: TeamPlayer) -> Self {
        Self {
            image: ImageResource::from_payload(player.logo.as_deref()),
            name: player.playername,
            details: player.extra,
        }
    }
}

/// Everything the team gamification page shows
///
/// `None` fields have not been loaded (yet).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamGamificationView {
    /// Visible team leaderboards, server order
    pub leaderboards: Option<Vec<Leaderboard>>,
    /// First visible team leaderboard
    pub leaderboard: Option<Leaderboard>,
    pub individual_player: Option<PlayerCard>,
    pub team_player: Option<PlayerCard>,
    pub attained_badges: Option<Vec<Badge>>,
    pub missing_badges: Option<Vec<Badge>>,
    pub failures: Vec<FetchFailure>,
}

impl TeamGamificationView {
    pub fn apply_leaderboards(&mut self, boards: Vec<Leaderboard>) {
        let boards = visible_team_boards(boards);
        self.leaderboard = boards.first().cloned();
        self.leaderboards = Some(boards);
    }

    pub fn apply_individual_player(&mut self, player: IndividualPlayer) {
        self.individual_player = Some(player.into());
    }

    pub fn apply_team_player(&mut self, player: TeamPlayer) {
        self.team_player = Some(player.into());
    }

    /// Replace the attained list
    pub fn apply_attained_badges(&mut self, records: Vec<AchievementRecord>) {
        self.attained_badges = Some(records.into_iter().map(Badge::attained).collect());
    }

    /// Replace the not-attained list
    pub fn apply_missing_badges(&mut self, records: Vec<AchievementRecord>) {
        self.missing_badges = Some(records.into_iter().map(Badge::not_attained).collect());
    }

    pub fn record_failure(&mut self, fetch: Fetch, error: &dyn fmt::Display) {
        self.failures.push(FetchFailure {
            fetch,
            message: error.to_string(),
        });
    }

    /// Whether `fetch` has produced data
    pub fn is_loaded(&self, fetch: Fetch) -> bool {
        match fetch {
            Fetch::Leaderboards => self.leaderboards.is_some(),
            Fetch::IndividualPlayer => self.individual_player.is_some(),
            Fetch::TeamPlayer => self.team_player.is_some(),
            Fetch::AttainedBadges => self.attained_badges.is_some(),
            Fetch::MissingBadges => self.missing_badges.is_some(),
        }
    }

    pub fn open_achieved_dialog(&self) -> AchievementDialog {
        AchievementDialog::new(DialogKind::Achieved, self.attained_badges.as_deref())
    }

    pub fn open_missing_dialog(&self) -> AchievementDialog {
        AchievementDialog::new(DialogKind::Missing, self.missing_badges.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AssessmentLevel;
    use crate::session::GameScope;

    fn record(name: &str, date: &str) -> AchievementRecord {
        AchievementRecord {
            name: name.to_string(),
            icon: Some("aWNvbg==".to_string()),
            date: Some(date.to_string()),
            units: 1,
            extra: Default::default(),
        }
    }

    fn board(id: i64, level: AssessmentLevel, visible: bool) -> Leaderboard {
        Leaderboard {
            id,
            name: None,
            assessment_level: level,
            student_visible: visible,
            extra: Default::default(),
        }
    }

    fn session(scope: bool) -> TeamSession {
        TeamSession {
            individual_player: "alice".to_string(),
            team_player: "pes11a".to_string(),
            scope: scope.then(|| GameScope {
                subject_acronym: "PES".to_string(),
                course: 2024,
                period: "Q1".to_string(),
            }),
        }
    }

    #[test]
    fn test_fetch_plan() {
        assert_eq!(fetch_plan(&session(true)).len(), 5);

        let plan = fetch_plan(&session(false));
        assert_eq!(plan.len(), 4);
        assert!(!plan.contains(&Fetch::Leaderboards));
    }

    #[test]
    fn test_apply_leaderboards() {
        let mut view = TeamGamificationView::default();
        view.apply_leaderboards(vec![
            board(1, AssessmentLevel::Individual, true),
            board(2, AssessmentLevel::Team, true),
            board(3, AssessmentLevel::Team, true),
        ]);

        assert_eq!(view.leaderboard.as_ref().map(|b| b.id), Some(2));
        assert_eq!(view.leaderboards.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_empty_filter_leaves_leaderboard_unset() {
        let mut view = TeamGamificationView::default();
        view.apply_leaderboards(vec![board(1, AssessmentLevel::Team, false)]);

        assert!(view.leaderboard.is_none());
        assert!(view.is_loaded(Fetch::Leaderboards));
    }

    #[test]
    fn test_players_get_images() {
        let mut view = TeamGamificationView::default();
        view.apply_team_player(TeamPlayer {
            playername: "pes11a".to_string(),
            logo: Some("bG9nbw==".to_string()),
            extra: Default::default(),
        });
        view.apply_individual_player(IndividualPlayer {
            playername: "alice".to_string(),
            avatar: None,
            extra: Default::default(),
        });

        let team = view.team_player.unwrap();
        assert_eq!(
            team.image.unwrap().as_str(),
            "data:image/jpg;base64,bG9nbw=="
        );
        assert!(view.individual_player.unwrap().image.is_none());
    }

    #[test]
    fn test_badge_lists_are_replaced() {
        let mut view = TeamGamificationView::default();
        view.apply_attained_badges(vec![record("a", "01-02-2024")]);
        view.apply_attained_badges(vec![record("b", "05-03-2024")]);

        let badges = view.attained_badges.as_ref().unwrap();
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].name, "b");
        assert_eq!(badges[0].date, "2024/03/05");

        view.apply_missing_badges(vec![record("c", "05-03-2024")]);
        assert_eq!(view.missing_badges.as_ref().unwrap()[0].date, "-");
    }

    #[test]
    fn test_dialogs_snapshot_current_lists() {
        let mut view = TeamGamificationView::default();
        assert!(view.open_achieved_dialog().is_pending());
        assert!(view.open_missing_dialog().is_pending());

        view.apply_attained_badges(vec![record("a", "01-02-2024"), record("b", "02-02-2024")]);
        let dialog = view.open_achieved_dialog();

        assert_eq!(dialog.kind, DialogKind::Achieved);
        assert_eq!(dialog.badges(), view.attained_badges.as_deref().unwrap());
        assert!(view.open_missing_dialog().is_pending());
    }

    #[test]
    fn test_record_failure() {
        let mut view = TeamGamificationView::default();
        view.record_failure(Fetch::TeamPlayer, &"API error 500: boom");

        assert_eq!(
            view.failures,
            vec![FetchFailure {
                fetch: Fetch::TeamPlayer,
                message: "API error 500: boom".to_string(),
            }]
        );
        assert!(!view.is_loaded(Fetch::TeamPlayer));
    }
}
