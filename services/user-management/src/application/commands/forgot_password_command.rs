//! 忘记密码命令

use telex_cqrs_core::Command;
use telex_errors::DomainResult;

use crate::application::dto::ForgotPasswordResponse;
use crate::domain::value_objects::ResetChannel;

/// 忘记密码命令
#[derive(Debug, Clone)]
pub struct ForgotPasswordCommand {
    /// 原始邮箱，由处理器负责校验和规范化
    pub email: String,
    pub channel: ResetChannel,
}

impl ForgotPasswordCommand {
    pub fn new(email: impl Into<String>, channel: ResetChannel) -> Self {
        Self {
            email: email.into(),
            channel,
        }
    }
}

impl Command for ForgotPasswordCommand {
    type Result = DomainResult<ForgotPasswordResponse>;
}
