//! HTTP API Client
//!
//! Executes `glide-dashboard` request descriptions with `gloo-net`.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use glide_dashboard::api::endpoints;
use glide_dashboard::api::{
    AchievementCategory, AchievementRecord, ApiRequest, ClientError, ClientResult,
    IndividualPlayer, Leaderboard, Method, RequestBody, TeamPlayer, DEFAULT_API_BASE,
};
use glide_dashboard::session::GameScope;

const API_URL_KEY: &str = "glide_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(API_URL_KEY, url);
    }
}

fn request_error(e: gloo_net::Error) -> ClientError {
    ClientError::Request(e.to_string())
}

/// Send a request and fail on any non-success status
async fn execute(request: &ApiRequest) -> ClientResult<Response> {
    let url = request.url(&get_api_base());

    let mut builder: RequestBuilder = match request.method {
        Method::Get => Request::get(&url),
        Method::Post => Request::post(&url),
        Method::Patch => Request::patch(&url),
    };

    if let Some(token) = &request.authorization {
        builder = builder.header("Authorization", token);
    }

    let response = match &request.body {
        RequestBody::None => builder.send().await,
        RequestBody::EmptyJson => {
            builder
                .json(&serde_json::json!({}))
                .map_err(request_error)?
                .send()
                .await
        }
        RequestBody::Form(_) => {
            builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(request.form_body().unwrap_or_default())
                .map_err(request_error)?
                .send()
                .await
        }
    }
    .map_err(|e| ClientError::Unavailable(e.to_string()))?;

    if response.ok() {
        Ok(response)
    } else {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        Err(ClientError::Status { status, message })
    }
}

/// Send a request and decode the JSON body
async fn fetch<T: DeserializeOwned>(request: ApiRequest) -> ClientResult<T> {
    let response = execute(&request).await?;
    let body = response.text().await.map_err(request_error)?;
    serde_json::from_str(&body).map_err(|e| ClientError::decode(request.operation, e))
}

// ============ API Functions ============

/// Fetch the leaderboards of a subject edition
pub async fn fetch_leaderboards(scope: &GameScope) -> ClientResult<Vec<Leaderboard>> {
    fetch(endpoints::leaderboards(
        &scope.subject_acronym,
        scope.course,
        &scope.period,
    ))
    .await
}

/// Fetch the results of one leaderboard
pub async fn fetch_leaderboard_results(id: i64) -> ClientResult<serde_json::Value> {
    fetch(endpoints::leaderboard_results(id)).await
}

pub async fn fetch_individual_player(player: &str) -> ClientResult<IndividualPlayer> {
    fetch(endpoints::individual_player(player)).await
}

pub async fn fetch_team_player(player: &str) -> ClientResult<TeamPlayer> {
    fetch(endpoints::team_player(player)).await
}

/// Fetch a player's badges, attained or not
pub async fn fetch_badges(player: &str, attained: bool) -> ClientResult<Vec<AchievementRecord>> {
    fetch(endpoints::player_achievements(
        player,
        attained,
        AchievementCategory::Badges,
    ))
    .await
}

/// Check the API with a cheap listing request
pub async fn check_connection() -> ClientResult<()> {
    execute(&endpoints::users()).await.map(|_| ())
}
