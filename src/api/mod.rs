//! GLiDe API Access
//!
//! Typed access to the GLiDe backend REST API.
//!
//! # Endpoints
//!
//! ## Leaderboards
//! - `GET /leaderboards/{id}`, `GET /leaderboards`, `GET /leaderboards/{id}/results`
//!
//! ## Metrics
//! - `GET /metrics/students`, `GET /metrics/current`, `GET /metrics`
//! - `GET /metrics/students/historical`, `GET /metrics/historical`
//! - `GET /metrics/categories`
//!
//! ## Players
//! - `GET /players/{name}/gamification`, `GET /players/{name}/monitoring`
//! - `PATCH /players/{name}/monitoring/selectedMetrics`
//! - `PATCH /players/{name}/monitoring/selectedDates`
//! - `GET /players/individuals`
//!
//! ## Gamification
//! - `GET /gamification/players/individuals/{name}`
//! - `GET /gamification/players/teams/{name}`
//! - `GET /gamification/players/{name}/achievements`
//! - `GET /gamification/evaluableActions`
//!
//! ## Students
//! - `POST /students/login`, `GET /students/players`
//!
//! [`endpoints`] only describes requests and compiles for any target; the
//! `reqwest` client lives behind the `native` feature.

#[cfg(feature = "native")]
mod client;
pub mod dto;
pub mod endpoints;
pub mod error;

#[cfg(feature = "native")]
pub use client::{DashboardClient, GamificationApi};
pub use dto::{
    AchievementCategory, AchievementRecord, AssessmentLevel, IndividualPlayer, Leaderboard,
    LoginResponse, StudentPlayer, TeamPlayer,
};
pub use endpoints::{ApiRequest, Method, RequestBody};
pub use error::{ClientError, ClientResult};

/// Default GLiDe API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";
