//! HTTP API handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rps_arena_core::Choice;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::*;
use crate::state::AppState;

// ============ Request/Response types ============

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id.0,
            username: u.username,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

#[derive(Deserialize)]
pub struct PlayRequest {
    pub choice: String,
}

#[derive(Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct SimulateRequest {
    pub rounds: u32,
    pub seed: Option<u64>,
}

#[derive(Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Deserialize)]
pub struct TickRequest {
    pub seconds: i64,
}

// ============ Helper to get user from header ============

fn get_user_id_from_header(headers: &axum::http::HeaderMap) -> Option<UserId> {
    headers
        .get("X-User-Id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(UserId)
}

fn missing_header() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({"error": "Missing X-User-Id header"})),
    )
}

fn user_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "User not found"})),
    )
}

// ============ User handlers ============

pub async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    let username = req.username.trim().to_string();
    if username.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Username must not be empty"})),
        );
    }
    if state.get_user_by_username(&username).is_some() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Username already exists"})),
        );
    }

    let user = state.register_user(username);
    (
        StatusCode::OK,
        Json(serde_json::json!(UserResponse::from(user))),
    )
}

pub async fn get_current_user(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    let user_id = match get_user_id_from_header(&headers) {
        Some(id) => id,
        None => return missing_header(),
    };

    match state.get_user(user_id) {
        Some(user) => (
            StatusCode::OK,
            Json(serde_json::json!(UserResponse::from(user))),
        ),
        None => user_not_found(),
    }
}

pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    let users: Vec<UserResponse> = state.list_users().into_iter().map(Into::into).collect();
    Json(serde_json::json!({"users": users}))
}

// ============ Game handlers ============

pub async fn play(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Json(req): Json<PlayRequest>,
) -> impl IntoResponse {
    let user_id = match get_user_id_from_header(&headers) {
        Some(id) => id,
        None => return missing_header(),
    };

    // Reject malformed input before it reaches the resolver.
    let choice: Choice = match req.choice.parse() {
        Ok(choice) => choice,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": e.to_string()})),
            )
        }
    };

    match state.play(user_id, choice) {
        Some(played) => (StatusCode::OK, Json(serde_json::json!(played))),
        None => user_not_found(),
    }
}

pub async fn get_stats(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    let user_id = match get_user_id_from_header(&headers) {
        Some(id) => id,
        None => return missing_header(),
    };

    match state.stats_for(user_id) {
        Some(stats) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "stats": stats,
                "percentages": stats.percentages(),
            })),
        ),
        None => user_not_found(),
    }
}

pub async fn get_history(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Query(query): Query<LimitQuery>,
) -> impl IntoResponse {
    let user_id = match get_user_id_from_header(&headers) {
        Some(id) => id,
        None => return missing_header(),
    };

    match state.history_for(user_id, query.limit) {
        Some(history) => (
            StatusCode::OK,
            Json(serde_json::json!({"matches": history})),
        ),
        None => user_not_found(),
    }
}

pub async fn get_analysis(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    let user_id = match get_user_id_from_header(&headers) {
        Some(id) => id,
        None => return missing_header(),
    };

    match state.analysis_for(user_id) {
        Some(analysis) => (StatusCode::OK, Json(serde_json::json!(analysis))),
        None => user_not_found(),
    }
}

pub async fn get_suggestion(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    let user_id = match get_user_id_from_header(&headers) {
        Some(id) => id,
        None => return missing_header(),
    };

    match state.suggestion_for(user_id) {
        Some(suggestion) => (StatusCode::OK, Json(serde_json::json!(suggestion))),
        None => user_not_found(),
    }
}

pub async fn get_summary(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    let user_id = match get_user_id_from_header(&headers) {
        Some(id) => id,
        None => return missing_header(),
    };

    match state.summary_for(user_id) {
        Some(summary) => (StatusCode::OK, Json(serde_json::json!(summary))),
        None => user_not_found(),
    }
}

pub async fn run_simulation(
    State(state): State<AppState>,
    Json(req): Json<SimulateRequest>,
) -> impl IntoResponse {
    match state.simulate_rounds(req.rounds, req.seed) {
        Ok(report) => (StatusCode::OK, Json(serde_json::json!(report))),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": e.to_string()})),
        ),
    }
}

pub async fn reset_stats(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    Json(req): Json<ResetRequest>,
) -> impl IntoResponse {
    let user_id = match get_user_id_from_header(&headers) {
        Some(id) => id,
        None => return missing_header(),
    };

    // The only destructive operation; never performed implicitly.
    if !req.confirm {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Reset requires confirm=true"})),
        );
    }

    if state.reset_profile(user_id) {
        (
            StatusCode::OK,
            Json(serde_json::json!({"message": "Statistics and history reset"})),
        )
    } else {
        user_not_found()
    }
}

pub async fn export_profile(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    let user_id = match get_user_id_from_header(&headers) {
        Some(id) => id,
        None => return missing_header(),
    };

    match state.export_for(user_id) {
        Some(snapshot) => (StatusCode::OK, Json(serde_json::json!(snapshot))),
        None => user_not_found(),
    }
}

// ============ Arena handlers ============

pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> impl IntoResponse {
    let entries = state.leaderboard(query.limit.unwrap_or(10));
    Json(serde_json::json!({"leaderboard": entries}))
}

pub async fn get_global_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!(state.global_stats()))
}

pub async fn recent_matches(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> impl IntoResponse {
    let matches = state.recent_matches(query.limit.unwrap_or(5));
    Json(serde_json::json!({"matches": matches}))
}

// ============ System handlers ============

pub async fn tick(State(state): State<AppState>, Json(req): Json<TickRequest>) -> impl IntoResponse {
    state.advance_time(req.seconds);
    Json(serde_json::json!({"now": state.now().to_rfc3339()}))
}
