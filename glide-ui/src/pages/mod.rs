//! Pages
//!
//! Top-level page components for each route.

pub mod settings;
pub mod team_gamification;

pub use settings::Settings;
pub use team_gamification::TeamGamification;
