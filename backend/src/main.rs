use std::sync::Arc;

use axum::http::header::HeaderName;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeader;
use tracing::{info, warn};

use crate::config::Config;
use crate::games::backend_wheel_game::create_router as create_wheel_game_router;
use crate::generator::{GeminiClient, GenerativeService};
use crate::handlers::{
    catalog_handler, content_handler, dismiss_content_handler, health_check, leaderboard_handler,
};
use crate::services::{ContentResolver, Session, SharedSession};

mod config;
mod error;
mod games;
mod generator;
mod handlers;
mod logging;
mod services;

#[derive(Clone)]
pub struct AppState {
    session: SharedSession,
    resolver: Arc<ContentResolver>,
}

impl AppState {
    pub fn new(resolver: Arc<ContentResolver>) -> Self {
        Self {
            session: Session::shared(),
            resolver,
        }
    }
}

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/health_check", get(health_check))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/leaderboard", get(leaderboard_handler))
        .route("/api/content", get(content_handler))
        .route("/api/content/dismiss", post(dismiss_content_handler))
        .nest("/api/wheel", create_wheel_game_router())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://127.0.0.1:8080"),
            HeaderValue::from_static("http://localhost:8080"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("x-requested-with"),
        ])
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::setup();

    let config = Config::from_env();
    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set, every winner will get fallback content");
    }

    let service: Arc<dyn GenerativeService> = Arc::new(GeminiClient::new(&config));
    let resolver = Arc::new(ContentResolver::new(service, &config));
    let state = AppState::new(resolver);

    if !config.static_dir.exists() {
        warn!("Static directory {} not found, only the API will be served", config.static_dir.display());
    }
    let index = config.static_dir.join("index.html");
    let static_service = SetResponseHeader::if_not_present(
        ServeDir::new(&config.static_dir).fallback(ServeFile::new(index)),
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache"),
    );

    let app = api_router()
        .layer(cors_layer())
        .fallback_service(static_service)
        .with_state(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
