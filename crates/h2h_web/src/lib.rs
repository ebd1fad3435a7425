use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/generate-news", get(handlers::generate_news))
        .route(
            "/api/create-social-content",
            post(handlers::create_social_content),
        )
        .route(
            "/api/create-content-series",
            post(handlers::create_content_series),
        )
        .route("/api/analyze-news", post(handlers::analyze_news))
        .route("/api/render-card", post(handlers::render_card))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use h2h_core::{Article, Error, Result};
}
