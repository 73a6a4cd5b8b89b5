//! 认证相关路由

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use telex_cqrs_core::CommandBus;
use tracing::debug;

use super::error::{ApiError, bad_request, domain_failure_response};
use super::state::AppState;
use crate::application::commands::ForgotPasswordCommand;
use crate::application::dto::ForgotPasswordRequest;

/// POST /api/v1/auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!(error = %rejection, "Malformed forgot password request");
            return Ok(bad_request(&rejection.body_text()));
        }
    };

    let command = ForgotPasswordCommand::from(request);
    let response = match state.command_bus.dispatch(command).await? {
        Ok(response) => Json(response).into_response(),
        Err(failure) => domain_failure_response(failure),
    };

    Ok(response)
}
