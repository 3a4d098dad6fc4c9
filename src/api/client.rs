//! GLiDe REST API Client
//!
//! Executes [`ApiRequest`] descriptions with `reqwest` and decodes the
//! responses into typed records. No retries and no caching: every call is
//! one request, and failures are returned to the caller.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;

use super::dto::{
    AchievementCategory, AchievementRecord, IndividualPlayer, Leaderboard, LoginResponse,
    StudentPlayer, TeamPlayer,
};
use super::endpoints::{self, ApiRequest, Method, RequestBody};
use super::error::{ClientError, ClientResult};
use crate::config::ApiConfig;

/// Operations the gamification views depend on
///
/// Implemented by [`DashboardClient`]; views take it as a trait object so
/// they can be driven by any source of records.
#[async_trait]
pub trait GamificationApi: Send + Sync {
    /// Leaderboards of one subject edition
    async fn leaderboards(
        &self,
        subject_acronym: &str,
        course: i32,
        period: &str,
    ) -> ClientResult<Vec<Leaderboard>>;

    async fn individual_player(&self, player: &str) -> ClientResult<IndividualPlayer>;

    async fn team_player(&self, player: &str) -> ClientResult<TeamPlayer>;

    async fn player_achievements(
        &self,
        player: &str,
        attained: bool,
        category: AchievementCategory,
    ) -> ClientResult<Vec<AchievementRecord>>;
}

/// HTTP client for the GLiDe API
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    /// Create a client from the `[api]` configuration section
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let mut builder = Client::builder().user_agent(concat!("glide/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL every request path is joined to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and fail on any non-success status
    async fn execute(&self, request: &ApiRequest) -> ClientResult<Response> {
        let url = request.url(&self.base_url);
        tracing::debug!(
            operation = request.operation,
            method = request.method.as_str(),
            url = %url,
            "Sending API request"
        );

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
        };

        if let Some(token) = &request.authorization {
            builder = builder.header(AUTHORIZATION, token.as_str());
        }

        builder = match &request.body {
            RequestBody::None => builder,
            RequestBody::EmptyJson => builder.json(&serde_json::json!({})),
            RequestBody::Form(_) => builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(request.form_body().unwrap_or_default()),
        };

        let response = builder.send().await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(operation = request.operation, status, "API request failed");
            Err(ClientError::Status { status, message })
        }
    }

    /// Send a request and decode the JSON body
    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        let response = self.execute(&request).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::decode(request.operation, e))
    }

    /// Send a write request, ignoring whatever body comes back
    async fn send(&self, request: ApiRequest) -> ClientResult<()> {
        self.execute(&request).await?;
        Ok(())
    }

    // ============ Leaderboards ============

    pub async fn leaderboard(&self, id: i64) -> ClientResult<Leaderboard> {
        self.fetch(endpoints::leaderboard(id)).await
    }

    pub async fn leaderboard_results(&self, id: i64) -> ClientResult<serde_json::Value> {
        self.fetch(endpoints::leaderboard_results(id)).await
    }

    // ============ Metrics ============

    pub async fn student_metrics(&self, project: &str) -> ClientResult<serde_json::Value> {
        self.fetch(endpoints::student_metrics(project)).await
    }

    pub async fn project_metrics(&self, project: &str) -> ClientResult<serde_json::Value> {
        self.fetch(endpoints::project_metrics(project)).await
    }

    pub async fn student_metrics_history(
        &self,
        project: &str,
        from: &str,
        to: &str,
    ) -> ClientResult<serde_json::Value> {
        self.fetch(endpoints::student_metrics_history(project, from, to))
            .await
    }

    pub async fn project_metrics_history(
        &self,
        project: &str,
        from: &str,
        to: &str,
    ) -> ClientResult<serde_json::Value> {
        self.fetch(endpoints::project_metrics_history(project, from, to))
            .await
    }

    pub async fn project_categories(&self, project: &str) -> ClientResult<serde_json::Value> {
        self.fetch(endpoints::project_categories(project)).await
    }

    pub async fn all_categories(&self) -> ClientResult<serde_json::Value> {
        self.fetch(endpoints::all_categories()).await
    }

    // ============ Players and monitoring ============

    pub async fn player_gamification(&self, player: &str) -> ClientResult<serde_json::Value> {
        self.fetch(endpoints::player_gamification(player)).await
    }

    pub async fn selected_metrics(&self, player: &str) -> ClientResult<serde_json::Value> {
        self.fetch(endpoints::selected_metrics(player)).await
    }

    pub async fn update_selected_metrics(
        &self,
        player: &str,
        metrics: &str,
        history_metrics: &str,
        bar_metrics: &str,
    ) -> ClientResult<()> {
        self.send(endpoints::update_selected_metrics(
            player,
            metrics,
            history_metrics,
            bar_metrics,
        ))
        .await
    }

    pub async fn update_selected_dates(
        &self,
        player: &str,
        start_date: &str,
        end_date: &str,
    ) -> ClientResult<()> {
        self.send(endpoints::update_selected_dates(player, start_date, end_date))
            .await
    }

    pub async fn users(&self) -> ClientResult<Vec<serde_json::Value>> {
        self.fetch(endpoints::users()).await
    }

    pub async fn evaluable_actions(&self) -> ClientResult<serde_json::Value> {
        self.fetch(endpoints::evaluable_actions()).await
    }

    // ============ Students ============

    /// Log in with an identity token, keeping status and headers
    pub async fn login(&self, token: &str) -> ClientResult<LoginResponse> {
        let request = endpoints::login(token);
        let response = self.execute(&request).await?;

        let status = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| ClientError::decode(request.operation, e))?
        };

        Ok(LoginResponse {
            status,
            headers,
            body,
        })
    }

    pub async fn student_players(&self, token: &str) -> ClientResult<Vec<StudentPlayer>> {
        self.fetch(endpoints::student_players(token)).await
    }
}

#[async_trait]
impl GamificationApi for DashboardClient {
    async fn leaderboards(
        &self,
        subject_acronym: &str,
        course: i32,
        period: &str,
    ) -> ClientResult<Vec<Leaderboard>> {
        self.fetch(endpoints::leaderboards(subject_acronym, course, period))
            .await
    }

    async fn individual_player(&self, player: &str) -> ClientResult<IndividualPlayer> {
        self.fetch(endpoints::individual_player(player)).await
    }

    async fn team_player(&self, player: &str) -> ClientResult<TeamPlayer> {
        self.fetch(endpoints::team_player(player)).await
    }

    async fn player_achievements(
        &self,
        player: &str,
        attained: bool,
        category: AchievementCategory,
    ) -> ClientResult<Vec<AchievementRecord>> {
        self.fetch(endpoints::player_achievements(player, attained, category))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Single-connection HTTP server answering with `response`; the handle
    /// yields the raw request it received
    async fn serve_once(response: String) -> (DashboardClient, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ApiConfig {
            base_url: format!("http://{}/api", listener.local_addr().unwrap()),
            request_timeout_secs: Some(5),
        };

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            while !request_complete(&raw) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (DashboardClient::new(&config).unwrap(), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= end + 4 + length
    }

    fn response(status: &str, headers: &[(&str, &str)], body: &str) -> String {
        let mut out = format!("HTTP/1.1 {}\r\n", status);
        for (name, value) in headers {
            out.push_str(&format!("{}: {}\r\n", name, value));
        }
        out.push_str(&format!(
            "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ));
        out
    }

    fn body_of(raw: &str) -> &str {
        raw.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or("")
    }

    #[tokio::test]
    async fn test_login_sends_raw_token_and_empty_json() {
        let (client, server) = serve_once(response(
            "200 OK",
            &[("X-Session-Id", "s-42")],
            "",
        ))
        .await;

        let login = client.login("tok-123").await.unwrap();
        let raw = server.await.unwrap();
        let lower = raw.to_ascii_lowercase();

        assert!(raw.starts_with("POST /api/students/login HTTP/1.1\r\n"));
        assert!(lower.contains("\r\nauthorization: tok-123\r\n"));
        assert!(lower.contains("\r\ncontent-type: application/json\r\n"));
        assert_eq!(body_of(&raw), "{}");

        assert_eq!(login.status, 200);
        assert_eq!(login.header("X-Session-Id"), Some("s-42"));
        assert_eq!(login.body, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_login_keeps_json_body() {
        let (client, server) =
            serve_once(response("201 Created", &[], r#"{"student":"alice"}"#)).await;

        let login = client.login("tok").await.unwrap();
        server.await.unwrap();

        assert_eq!(login.status, 201);
        assert_eq!(login.body["student"], "alice");
    }

    #[tokio::test]
    async fn test_patch_sends_form_body() {
        let (client, server) = serve_once(response("200 OK", &[], "")).await;

        client
            .update_selected_dates("team 1", "2024-01-01", "2024-02-01")
            .await
            .unwrap();
        let raw = server.await.unwrap();

        assert!(raw.starts_with("PATCH /api/players/team%201/monitoring/selectedDates HTTP/1.1\r\n"));
        assert!(raw
            .to_ascii_lowercase()
            .contains("\r\ncontent-type: application/x-www-form-urlencoded\r\n"));
        assert_eq!(body_of(&raw), "startDate=2024-01-01&endDate=2024-02-01");
    }

    #[tokio::test]
    async fn test_achievements_query_and_decode() {
        let (client, server) = serve_once(response(
            "200 OK",
            &[("Content-Type", "application/json")],
            r#"[{"name":"Reviewer","date":"01-02-2024","units":null}]"#,
        ))
        .await;

        let records = client
            .player_achievements("pes11a", true, AchievementCategory::Badges)
            .await
            .unwrap();
        let raw = server.await.unwrap();

        assert!(raw.starts_with(
            "GET /api/gamification/players/pes11a/achievements?attained=true&category=Badges HTTP/1.1\r\n"
        ));
        assert!(!raw.to_ascii_lowercase().contains("\r\nauthorization:"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].units, 0);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (client, server) = serve_once(response("404 Not Found", &[], "no such team")).await;

        let err = client.team_player("ghost").await.unwrap_err();
        server.await.unwrap();

        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "no such team");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_is_a_decode_error() {
        let (client, server) = serve_once(response("200 OK", &[], "not json")).await;

        let err = client.team_player("pes11a").await.unwrap_err();
        server.await.unwrap();

        match err {
            ClientError::Decode { operation, .. } => assert_eq!(operation, "get team player"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_base_url_is_normalized() {
        let config = ApiConfig {
            base_url: "http://localhost:8080/api/".to_string(),
            request_timeout_secs: None,
        };
        let client = DashboardClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
    }

    #[tokio::test]
    async fn test_unreachable_api() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            request_timeout_secs: Some(2),
        };
        let client = DashboardClient::new(&config).unwrap();

        let err = client.team_player("team1").await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Unavailable(_) | ClientError::Request(_) | ClientError::Timeout
        ));
    }
}
