//! 健康检查与指标

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use telex_adapter_postgres::check_connection;
use telex_telemetry::HealthStatus;

use super::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Response {
    let mut status = HealthStatus::new();

    if let Some(pool) = &state.db_pool {
        match check_connection(pool).await {
            Ok(()) => status.add_check("postgres", true, None),
            Err(e) => status.add_check("postgres", false, Some(e.to_string())),
        }
    }

    let code = if status.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(status)).into_response()
}

/// GET /metrics
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}
