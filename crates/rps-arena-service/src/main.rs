//! RPS Arena Service
//!
//! User accounts, persisted match history, aggregate statistics, and a
//! leaderboard around the core rules library.

mod handlers;
mod models;
mod state;
mod storage;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handlers::*;
use state::AppState;
use storage::JsonStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Optional JSON store; memory-only without it.
    let state = if let Ok(path) = std::env::var("RPS_STORE_PATH") {
        tracing::info!("Store enabled: {}", path);
        AppState::with_store(JsonStore::new(path))
    } else {
        tracing::info!("Store not configured (set RPS_STORE_PATH to enable)");
        AppState::new()
    };
    state.restore();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // User
        .route("/api/user/register", post(register_user))
        .route("/api/user/me", get(get_current_user))
        .route("/api/users", get(list_users))
        // Game
        .route("/api/game/play", post(play))
        .route("/api/game/stats", get(get_stats))
        .route("/api/game/history", get(get_history))
        .route("/api/game/analysis", get(get_analysis))
        .route("/api/game/suggestion", get(get_suggestion))
        .route("/api/game/summary", get(get_summary))
        .route("/api/game/simulate", post(run_simulation))
        .route("/api/game/reset", post(reset_stats))
        .route("/api/game/export", get(export_profile))
        // Arena
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/stats/global", get(get_global_stats))
        .route("/api/matches/recent", get(recent_matches))
        // System
        .route("/api/system/tick", post(tick))
        // Health
        .route("/api/health", get(health))
        .layer(cors)
        .with_state(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Arena service starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn health() -> &'static str {
    "ok"
}
