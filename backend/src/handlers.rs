use axum::{
    body::Body,
    extract::State,
    http::Response,
    response::{IntoResponse, Json},
};
use shared::catalog::{Slice, CATALOG};
use shared::ranking::{rank_slices, LeaderboardEntry};
use shared::shared_wheel_game::ContentResponse;
use tracing::debug;

use crate::AppState;

pub async fn health_check() -> impl IntoResponse {
    Response::builder()
        .status(200)
        .body(Body::from("OK"))
        .unwrap_or_default()
}

pub async fn catalog_handler() -> Json<Vec<Slice>> {
    Json(CATALOG.clone())
}

/// Handler to retrieve the win leaderboard
pub async fn leaderboard_handler(State(state): State<AppState>) -> Json<Vec<LeaderboardEntry>> {
    let session = state.session.lock().await;
    Json(rank_slices(&CATALOG, session.tally()))
}

pub async fn content_handler(State(state): State<AppState>) -> Json<ContentResponse> {
    Json(state.session.lock().await.content_view())
}

pub async fn dismiss_content_handler(State(state): State<AppState>) -> Json<ContentResponse> {
    let mut session = state.session.lock().await;
    session.dismiss();
    debug!("Result view dismissed");
    Json(session.content_view())
}
