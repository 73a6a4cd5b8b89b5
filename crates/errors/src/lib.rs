//! telex-errors - 统一错误处理
//!
//! 基础设施错误走 `AppError`，基于 RFC 7807 Problem Details 规范对外暴露；
//! 可预期的业务失败走 `DomainFailure`，作为返回值而不是错误传播。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn external_service(msg: impl Into<String>) -> Self {
        Self::ExternalService(msg.into())
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
            Self::Database(_) => 500,
            Self::ExternalService(_) => 502,
        }
    }

    /// 是否为服务端故障（5xx）
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// 转换为 Problem Details
    pub fn to_problem_details(&self) -> ProblemDetails {
        ProblemDetails {
            r#type: self.problem_type(),
            title: self.problem_title(),
            status: self.status_code(),
            detail: self.to_string(),
            instance: None,
        }
    }

    /// 转换为可对外返回的 Problem Details
    ///
    /// 5xx 错误不携带内部细节。
    pub fn to_public_problem_details(&self) -> ProblemDetails {
        let mut problem = self.to_problem_details();
        if self.is_server_error() {
            problem.detail = "An unexpected error occurred. Please try again later.".to_string();
        }
        problem
    }

    fn problem_type(&self) -> String {
        let slug = match self {
            Self::NotFound(_) => "not-found",
            Self::Validation(_) => "validation",
            Self::Unauthorized(_) => "unauthorized",
            Self::Conflict(_) => "conflict",
            Self::Internal(_) => "internal",
            Self::Database(_) => "database",
            Self::ExternalService(_) => "external-service",
        };
        format!("https://api.telex.im/problems/{}", slug)
    }

    fn problem_title(&self) -> String {
        match self {
            Self::NotFound(_) => "Resource Not Found".to_string(),
            Self::Validation(_) => "Validation Error".to_string(),
            Self::Unauthorized(_) => "Unauthorized".to_string(),
            Self::Conflict(_) => "Conflict".to_string(),
            Self::Internal(_) => "Internal Server Error".to_string(),
            Self::Database(_) => "Database Error".to_string(),
            Self::ExternalService(_) => "External Service Error".to_string(),
        }
    }
}

/// RFC 7807 Problem Details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

/// 业务失败
///
/// 调用方可以纠正的预期结果（例如用户不存在），携带面向用户的原因文本。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct DomainFailure {
    reason: String,
}

impl DomainFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// 业务结果：成功值或业务失败
pub type DomainResult<T> = Result<T, DomainFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::not_found("x").status_code(), 404);
        assert_eq!(AppError::validation("x").status_code(), 400);
        assert_eq!(AppError::database("x").status_code(), 500);
        assert_eq!(AppError::external_service("x").status_code(), 502);
    }

    #[test]
    fn test_public_problem_details_hides_internals() {
        let err = AppError::database("connection refused at 10.0.0.3:5432");
        let problem = err.to_public_problem_details();
        assert_eq!(problem.status, 500);
        assert!(!problem.detail.contains("10.0.0.3"));

        let internal = err.to_problem_details();
        assert!(internal.detail.contains("10.0.0.3"));
    }

    #[test]
    fn test_public_problem_details_keeps_client_errors() {
        let problem = AppError::validation("email is required").to_public_problem_details();
        assert_eq!(problem.status, 400);
        assert!(problem.detail.contains("email is required"));
    }

    #[test]
    fn test_domain_failure_reason() {
        let failure = DomainFailure::new("User with email does not exist");
        assert_eq!(failure.reason(), "User with email does not exist");
        assert_eq!(failure.to_string(), "User with email does not exist");
    }
}
