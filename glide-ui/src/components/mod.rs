//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod achievement_dialog;
pub mod badge_list;
pub mod leaderboard_card;
pub mod loading;
pub mod nav;
pub mod player_card;
pub mod toast;

pub use achievement_dialog::AchievementDialogView;
pub use badge_list::BadgeList;
pub use leaderboard_card::LeaderboardCard;
pub use loading::{Loading, PlayerSkeleton};
pub use nav::Nav;
pub use player_card::PlayerCardView;
pub use toast::Toast;
