//! Data Transfer Objects
//!
//! Typed records decoded from GLiDe API responses.
//! Fields the dashboard does not interpret are kept in a flattened `extra`
//! map so a record can be re-serialized without losing server data.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// JSON fields a record carries beyond the typed ones
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;

/// Decode an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================
// LEADERBOARD DTOs
// ============================================

/// Level at which a leaderboard ranks players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentLevel {
    Individual,
    Team,
    /// Any level this client does not know about
    #[serde(other)]
    Unknown,
}

/// Leaderboard definition as returned by `GET /leaderboards`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub assessment_level: AssessmentLevel,
    /// Whether students may see this leaderboard; `null` reads as hidden
    #[serde(default, deserialize_with = "null_as_default")]
    pub student_visible: bool,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Leaderboard {
    /// Leaderboards shown on the team view: team level and visible to students
    pub fn is_visible_team_board(&self) -> bool {
        self.assessment_level == AssessmentLevel::Team && self.student_visible
    }
}

// ============================================
// PLAYER DTOs
// ============================================

/// Individual player profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualPlayer {
    pub playername: String,
    /// Base64-encoded avatar image
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Team player profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPlayer {
    pub playername: String,
    /// Base64-encoded team logo
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Player entry returned by `GET /students/players`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPlayer {
    pub id: i64,
    pub playername: String,
    pub game_subject_acronym: String,
    pub game_course: i32,
    pub game_period: String,
}

// ============================================
// ACHIEVEMENT DTOs
// ============================================

/// Achievement category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementCategory {
    Badges,
    Points,
}

impl AchievementCategory {
    /// Value sent in the `category` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementCategory::Badges => "Badges",
            AchievementCategory::Points => "Points",
        }
    }
}

/// Achievement held (or not yet held) by a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementRecord {
    pub name: String,
    /// Base64-encoded icon
    #[serde(default)]
    pub icon: Option<String>,
    /// Attainment date in `DD-MM-YYYY` form
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub units: i64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

// ============================================
// LOGIN DTOs
// ============================================

/// Full login response, headers included
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginResponse {
    pub status: u16,
    /// Response headers, lower-cased names
    pub headers: BTreeMap<String, String>,
    pub body: serde_json::Value,
}

impl LoginResponse {
    /// Look up a header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaderboard_decodes_known_and_extra_fields() {
        let board: Leaderboard = serde_json::from_value(json!({
            "id": 7,
            "name": "Sprint ranking",
            "assessmentLevel": "Team",
            "studentVisible": true,
            "anonymization": "None"
        }))
        .unwrap();

        assert_eq!(board.id, 7);
        assert_eq!(board.assessment_level, AssessmentLevel::Team);
        assert!(board.is_visible_team_board());
        assert_eq!(board.extra["anonymization"], json!("None"));
    }

    #[test]
    fn test_unknown_assessment_level() {
        let board: Leaderboard = serde_json::from_value(json!({
            "id": 1,
            "assessmentLevel": "Department"
        }))
        .unwrap();

        assert_eq!(board.assessment_level, AssessmentLevel::Unknown);
        assert!(!board.student_visible);
        assert!(!board.is_visible_team_board());
    }

    #[test]
    fn test_achievement_without_date() {
        let record: AchievementRecord = serde_json::from_value(json!({
            "name": "First commit",
            "icon": "aWNvbg==",
            "units": 3
        }))
        .unwrap();

        assert_eq!(record.date, None);
        assert_eq!(record.units, 3);
    }

    #[test]
    fn test_null_visibility_hides_board_without_failing_the_list() {
        let boards: Vec<Leaderboard> = serde_json::from_value(json!([
            { "id": 1, "assessmentLevel": "Team", "studentVisible": true },
            { "id": 2, "assessmentLevel": "Team", "studentVisible": null }
        ]))
        .unwrap();

        assert_eq!(boards.len(), 2);
        assert!(boards[0].is_visible_team_board());
        assert!(!boards[1].student_visible);
        assert!(!boards[1].is_visible_team_board());
    }

    #[test]
    fn test_null_units_default_to_zero() {
        let records: Vec<AchievementRecord> = serde_json::from_value(json!([
            { "name": "Reviewer", "date": "01-02-2024", "units": null },
            { "name": "Builder", "units": 4 }
        ]))
        .unwrap();

        assert_eq!(records[0].units, 0);
        assert_eq!(records[1].units, 4);
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let result: Result<TeamPlayer, _> = serde_json::from_value(json!({ "logo": "abc" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_login_header_lookup() {
        let mut headers = BTreeMap::new();
        headers.insert("authorization".to_string(), "Bearer abc".to_string());
        let response = LoginResponse {
            status: 200,
            headers,
            body: serde_json::Value::Null,
        };

        assert_eq!(response.header("Authorization"), Some("Bearer abc"));
        assert_eq!(response.header("x-missing"), None);
    }
}
