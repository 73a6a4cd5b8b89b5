//! 错误到 HTTP 响应的映射

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use telex_errors::{AppError, DomainFailure};

use crate::application::dto::ApiResponse;

/// 基础设施错误，以 RFC 7807 Problem Details 返回
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(self.0.to_public_problem_details()),
        )
            .into_response()
    }
}

/// 业务失败，以 400 + 统一信封返回
pub fn domain_failure_response(failure: DomainFailure) -> Response {
    bad_request(failure.reason())
}

pub fn bad_request(reason: &str) -> Response {
    let body: ApiResponse<()> = ApiResponse::failure(StatusCode::BAD_REQUEST.as_u16(), reason);
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
