use axum::{
    debug_handler,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use rand::rngs::OsRng;
use shared::catalog::CATALOG;
use shared::constants::ALREADY_SPINNING_MESSAGE;
use shared::shared_wheel_game::*;

use crate::error::Error;
use crate::services::session_service::{settle_and_resolve, Session};
use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/spin", post(spin_wheel))
        .route("/settle", post(settle_wheel))
        .route("/state", get(get_wheel_state))
        .route("/reset", post(reset_wheel))
}

#[debug_handler]
async fn spin_wheel(State(state): State<AppState>) -> Json<WheelSpinResponse> {
    let mut session = state.session.lock().await;

    let Some(outcome) = session.spin(&CATALOG, &mut OsRng) else {
        return Json(WheelSpinResponse {
            success: false,
            rotation: session.state_view().rotation,
            spin_delta: None,
            winner_index: None,
            winner: None,
            duration_ms: SPIN_DURATION_MS,
            message: Some(ALREADY_SPINNING_MESSAGE.to_string()),
        });
    };

    tracing::info!(
        "🎡 WHEEL SPIN: +{:.1}° to {:.1}°, landing on {}",
        outcome.spin_delta,
        outcome.rotation,
        outcome.winner.name
    );

    Json(WheelSpinResponse {
        success: true,
        rotation: outcome.rotation,
        spin_delta: Some(outcome.spin_delta),
        winner_index: Some(outcome.winner_index),
        winner: Some(outcome.winner),
        duration_ms: SPIN_DURATION_MS,
        message: None,
    })
}

/// Called by the page once the rotation animation has finished.
#[debug_handler]
async fn settle_wheel(State(state): State<AppState>) -> Result<Json<WheelSettleResponse>, Error> {
    let (response, _resolution) = settle_and_resolve(&state.session, &state.resolver)
        .await
        .ok_or(Error::NoPendingSpin)?;
    Ok(Json(response))
}

async fn get_wheel_state(State(state): State<AppState>) -> Json<WheelStateResponse> {
    Json(state.session.lock().await.state_view())
}

/// Starts a fresh session, same as reloading the page.
async fn reset_wheel(State(state): State<AppState>) -> Json<WheelStateResponse> {
    let mut session = state.session.lock().await;
    *session = Session::new();
    tracing::info!("Session reset");
    Json(session.state_view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::generator::mock::MockGenerativeService;
    use crate::services::ContentResolver;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde::de::DeserializeOwned;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let resolver = ContentResolver::new(Arc::new(MockGenerativeService::failing()), &Config::default());
        AppState::new(Arc::new(resolver))
    }

    async fn call<T: DeserializeOwned>(state: &AppState, method: &str, uri: &str) -> (StatusCode, Option<T>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = crate::api_router()
            .with_state(state.clone())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).ok())
    }

    #[tokio::test]
    async fn test_spin_then_settle_roundtrip() {
        let state = test_state();

        let (status, spin) = call::<WheelSpinResponse>(&state, "POST", "/api/wheel/spin").await;
        assert_eq!(status, StatusCode::OK);
        let spin = spin.unwrap();
        assert!(spin.success);
        assert!(spin.rotation >= 1800.0 && spin.rotation < 3600.0);
        assert_eq!(spin.duration_ms, SPIN_DURATION_MS);

        let (_, again) = call::<WheelSpinResponse>(&state, "POST", "/api/wheel/spin").await;
        let again = again.unwrap();
        assert!(!again.success);
        assert_eq!(again.rotation, spin.rotation);

        let (status, settled) = call::<WheelSettleResponse>(&state, "POST", "/api/wheel/settle").await;
        assert_eq!(status, StatusCode::OK);
        let settled = settled.unwrap();
        assert_eq!(Some(settled.winner.clone()), spin.winner);
        assert_eq!(settled.wins, 1);

        let (_, wheel) = call::<WheelStateResponse>(&state, "GET", "/api/wheel/state").await;
        let wheel = wheel.unwrap();
        assert!(!wheel.is_spinning);
        assert_eq!(wheel.tally.wins(&settled.winner.id), 1);
    }

    #[tokio::test]
    async fn test_settle_without_spin_conflicts() {
        let state = test_state();
        let (status, _) = call::<serde_json::Value>(&state, "POST", "/api/wheel/settle").await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_reset_clears_rotation_and_tally() {
        let state = test_state();
        call::<WheelSpinResponse>(&state, "POST", "/api/wheel/spin").await;
        call::<WheelSettleResponse>(&state, "POST", "/api/wheel/settle").await;

        let (_, wheel) = call::<WheelStateResponse>(&state, "POST", "/api/wheel/reset").await;
        let wheel = wheel.unwrap();
        assert_eq!(wheel.rotation, 0.0);
        assert_eq!(wheel.tally, WinTally::new());
        assert!(wheel.winner.is_none());
    }
}
