//! HTTP API

mod auth;
mod error;
mod health;
mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/auth/forgot-password", post(auth::forgot_password))
        .route("/health", get(health::health))
        .route("/metrics", get(health::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
