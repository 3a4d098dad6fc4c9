//! Team Gamification
//!
//! Read model behind the team gamification page: which requests it issues,
//! how each response is shaped for display, and the dialogs listing badges.
//!
//! ## Data Flow
//!
//! 1. The controller reads the player names from the session store
//! 2. Up to five independent fetches are issued through the API client
//! 3. Each response is folded into [`TeamGamificationView`] as it arrives
//! 4. Dialogs are opened with a snapshot of the current badge lists

mod badges;
#[cfg(feature = "native")]
mod controller;
mod dialog;
mod leaderboard;
mod view;

pub use badges::{reverse_date, Badge, ImageResource, NOT_ATTAINED_DATE};
#[cfg(feature = "native")]
pub use controller::TeamGamificationController;
pub use dialog::{AchievementDialog, DialogContents, DialogKind};
pub use leaderboard::{active_board, visible_team_boards};
pub use view::{fetch_plan, Fetch, FetchFailure, PlayerCard, TeamGamificationView};
