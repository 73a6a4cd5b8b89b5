//! 服务错误定义

use telex_errors::DomainFailure;
use thiserror::Error;

use crate::domain::value_objects::EmailError;

/// 业务层面的预期失败，以值的形式返回给调用方
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("User with email does not exist")]
    UserWithEmailNotFound,

    #[error("Invalid email address")]
    InvalidEmail,
}

/// 格式错误的邮箱对外与不存在的用户使用同一原因
impl From<UserError> for DomainFailure {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidEmail => UserError::UserWithEmailNotFound.into(),
            UserError::UserWithEmailNotFound => DomainFailure::new(err.to_string()),
        }
    }
}

impl From<EmailError> for UserError {
    fn from(_: EmailError) -> Self {
        UserError::InvalidEmail
    }
}
