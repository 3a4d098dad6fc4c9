//! Endpoint Catalogue
//!
//! One function per GLiDe API operation. Each returns an [`ApiRequest`]
//! describing verb, path, query, headers and body; executing it is left to
//! a transport (`reqwest` natively, `gloo-net` in the browser).
//!
//! Path segments and query values are percent-encoded, so identifiers
//! containing `/`, `&` or `?` cannot change the shape of the request.

use std::borrow::Cow;

use super::dto::AchievementCategory;

/// HTTP verb of an API operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

/// Request body of an API operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    None,
    /// Literal `{}` JSON object
    EmptyJson,
    /// `application/x-www-form-urlencoded` fields
    Form(Vec<(&'static str, String)>),
}

/// Transport-independent description of one API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Operation name, used in logs and decode errors
    pub operation: &'static str,
    pub method: Method,
    /// Path relative to the API base, already encoded
    pub path: String,
    /// Query parameters, unencoded
    pub query: Vec<(&'static str, String)>,
    /// Raw value for the `Authorization` header
    pub authorization: Option<String>,
    pub body: RequestBody,
}

impl ApiRequest {
    fn new(operation: &'static str, method: Method, path: String) -> Self {
        Self {
            operation,
            method,
            path,
            query: Vec::new(),
            authorization: None,
            body: RequestBody::None,
        }
    }

    fn get(operation: &'static str, path: String) -> Self {
        Self::new(operation, Method::Get, path)
    }

    fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    fn authorized(mut self, token: &str) -> Self {
        self.authorization = Some(token.to_string());
        self
    }

    /// Path plus encoded query string
    pub fn relative_url(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, encode_pairs(&self.query))
        }
    }

    /// Absolute URL against an API base such as `http://localhost:8080/api`
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.relative_url())
    }

    /// Encoded form body, if this request sends one
    pub fn form_body(&self) -> Option<String> {
        match &self.body {
            RequestBody::Form(fields) => Some(encode_pairs(fields)),
            _ => None,
        }
    }
}

fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

fn encode_pairs(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

// ============================================
// Leaderboards
// ============================================

pub fn leaderboard(id: i64) -> ApiRequest {
    ApiRequest::get("get leaderboard", format!("/leaderboards/{}", id))
}

/// Leaderboards of one subject edition
pub fn leaderboards(subject_acronym: &str, course: i32, period: &str) -> ApiRequest {
    ApiRequest::get("get leaderboards", "/leaderboards".to_string())
        .param("gameSubjectAcronym", subject_acronym)
        .param("gameCourse", course)
        .param("gamePeriod", period)
}

pub fn leaderboard_results(id: i64) -> ApiRequest {
    ApiRequest::get("get leaderboard results", format!("/leaderboards/{}/results", id))
}

// ============================================
// Metrics
// ============================================

pub fn student_metrics(project: &str) -> ApiRequest {
    ApiRequest::get("get student metrics", "/metrics/students".to_string()).param("prj", project)
}

pub fn project_metrics(project: &str) -> ApiRequest {
    ApiRequest::get("get project metrics", "/metrics/current".to_string()).param("prj", project)
}

pub fn student_metrics_history(project: &str, from: &str, to: &str) -> ApiRequest {
    ApiRequest::get(
        "get student metrics history",
        "/metrics/students/historical".to_string(),
    )
    .param("prj", project)
    .param("from", from)
    .param("to", to)
}

pub fn project_metrics_history(project: &str, from: &str, to: &str) -> ApiRequest {
    ApiRequest::get("get project metrics history", "/metrics/historical".to_string())
        .param("prj", project)
        .param("from", from)
        .param("to", to)
}

pub fn project_categories(project: &str) -> ApiRequest {
    ApiRequest::get("get project categories", "/metrics".to_string()).param("prj", project)
}

pub fn all_categories() -> ApiRequest {
    ApiRequest::get("get all categories", "/metrics/categories".to_string())
}

// ============================================
// Players and monitoring
// ============================================

pub fn player_gamification(player: &str) -> ApiRequest {
    ApiRequest::get(
        "get player gamification",
        format!("/players/{}/gamification", segment(player)),
    )
}

pub fn selected_metrics(player: &str) -> ApiRequest {
    ApiRequest::get(
        "get selected metrics",
        format!("/players/{}/monitoring", segment(player)),
    )
}

/// Store which metrics the player monitors; each argument is a serialized list
pub fn update_selected_metrics(
    player: &str,
    metrics: &str,
    history_metrics: &str,
    bar_metrics: &str,
) -> ApiRequest {
    let mut request = ApiRequest::new(
        "update selected metrics",
        Method::Patch,
        format!("/players/{}/monitoring/selectedMetrics", segment(player)),
    );
    request.body = RequestBody::Form(vec![
        ("selectedMetrics", metrics.to_string()),
        ("selectedHistoryMetrics", history_metrics.to_string()),
        ("selectedBarMetrics", bar_metrics.to_string()),
    ]);
    request
}

pub fn update_selected_dates(player: &str, start_date: &str, end_date: &str) -> ApiRequest {
    let mut request = ApiRequest::new(
        "update selected dates",
        Method::Patch,
        format!("/players/{}/monitoring/selectedDates", segment(player)),
    );
    request.body = RequestBody::Form(vec![
        ("startDate", start_date.to_string()),
        ("endDate", end_date.to_string()),
    ]);
    request
}

pub fn users() -> ApiRequest {
    ApiRequest::get("get users", "/players/individuals".to_string())
}

// ============================================
// Gamification
// ============================================

pub fn individual_player(player: &str) -> ApiRequest {
    ApiRequest::get(
        "get individual player",
        format!("/gamification/players/individuals/{}", segment(player)),
    )
}

pub fn team_player(player: &str) -> ApiRequest {
    ApiRequest::get(
        "get team player",
        format!("/gamification/players/teams/{}", segment(player)),
    )
}

pub fn player_achievements(
    player: &str,
    attained: bool,
    category: AchievementCategory,
) -> ApiRequest {
    ApiRequest::get(
        "get player achievements",
        format!("/gamification/players/{}/achievements", segment(player)),
    )
    .param("attained", attained)
    .param("category", category.as_str())
}

pub fn evaluable_actions() -> ApiRequest {
    ApiRequest::get(
        "get evaluable actions",
        "/gamification/evaluableActions".to_string(),
    )
}

// ============================================
// Students
// ============================================

/// Exchange an identity token for a session; the caller needs the headers
pub fn login(token: &str) -> ApiRequest {
    let mut request =
        ApiRequest::new("post login", Method::Post, "/students/login".to_string()).authorized(token);
    request.body = RequestBody::EmptyJson;
    request
}

pub fn student_players(token: &str) -> ApiRequest {
    ApiRequest::get("get student players", "/students/players".to_string()).authorized(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaderboards_query() {
        let request = leaderboards("CS101", 2, "Fall");
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.relative_url(),
            "/leaderboards?gameSubjectAcronym=CS101&gameCourse=2&gamePeriod=Fall"
        );
    }

    #[test]
    fn test_paths_without_params() {
        assert_eq!(leaderboard(12).relative_url(), "/leaderboards/12");
        assert_eq!(leaderboard_results(12).relative_url(), "/leaderboards/12/results");
        assert_eq!(all_categories().relative_url(), "/metrics/categories");
        assert_eq!(users().relative_url(), "/players/individuals");
        assert_eq!(
            evaluable_actions().relative_url(),
            "/gamification/evaluableActions"
        );
        assert_eq!(
            player_gamification("alice").relative_url(),
            "/players/alice/gamification"
        );
        assert_eq!(selected_metrics("alice").relative_url(), "/players/alice/monitoring");
        assert_eq!(
            individual_player("alice").relative_url(),
            "/gamification/players/individuals/alice"
        );
        assert_eq!(
            team_player("pes11a").relative_url(),
            "/gamification/players/teams/pes11a"
        );
    }

    #[test]
    fn test_metrics_params() {
        assert_eq!(student_metrics("pes11a").relative_url(), "/metrics/students?prj=pes11a");
        assert_eq!(project_metrics("pes11a").relative_url(), "/metrics/current?prj=pes11a");
        assert_eq!(project_categories("pes11a").relative_url(), "/metrics?prj=pes11a");
        assert_eq!(
            student_metrics_history("pes11a", "2024-02-01", "2024-03-01").relative_url(),
            "/metrics/students/historical?prj=pes11a&from=2024-02-01&to=2024-03-01"
        );
        assert_eq!(
            project_metrics_history("pes11a", "2024-02-01", "2024-03-01").relative_url(),
            "/metrics/historical?prj=pes11a&from=2024-02-01&to=2024-03-01"
        );
    }

    #[test]
    fn test_achievements_query() {
        let request = player_achievements("team1", true, AchievementCategory::Badges);
        assert_eq!(
            request.relative_url(),
            "/gamification/players/team1/achievements?attained=true&category=Badges"
        );

        let request = player_achievements("team1", false, AchievementCategory::Badges);
        assert!(request.relative_url().ends_with("?attained=false&category=Badges"));
    }

    #[test]
    fn test_patch_requests_send_form_bodies() {
        let request = update_selected_metrics("alice", "a,b", "c", "d e");
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.relative_url(), "/players/alice/monitoring/selectedMetrics");
        assert_eq!(
            request.form_body().unwrap(),
            "selectedMetrics=a%2Cb&selectedHistoryMetrics=c&selectedBarMetrics=d%20e"
        );

        let request = update_selected_dates("alice", "2024-01-01", "2024-02-01");
        assert_eq!(request.relative_url(), "/players/alice/monitoring/selectedDates");
        assert_eq!(
            request.form_body().unwrap(),
            "startDate=2024-01-01&endDate=2024-02-01"
        );
    }

    #[test]
    fn test_login_carries_token_and_empty_body() {
        let request = login("token-123");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.relative_url(), "/students/login");
        assert_eq!(request.authorization.as_deref(), Some("token-123"));
        assert_eq!(request.body, RequestBody::EmptyJson);

        let request = student_players("token-123");
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.authorization.as_deref(), Some("token-123"));
        assert_eq!(request.form_body(), None);
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        assert_eq!(
            individual_player("a/b?c&d").relative_url(),
            "/gamification/players/individuals/a%2Fb%3Fc%26d"
        );
        assert_eq!(
            student_metrics("x&admin=1").relative_url(),
            "/metrics/students?prj=x%26admin%3D1"
        );
    }

    #[test]
    fn test_url_joins_base() {
        let request = leaderboard(3);
        assert_eq!(
            request.url("http://localhost:8080/api/"),
            "http://localhost:8080/api/leaderboards/3"
        );
        assert_eq!(
            request.url("http://localhost:8080/api"),
            "http://localhost:8080/api/leaderboards/3"
        );
    }
}
