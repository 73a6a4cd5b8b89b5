//! 忘记密码请求与响应

use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::application::commands::ForgotPasswordCommand;
use crate::domain::value_objects::ResetChannel;

pub const FORGOT_PASSWORD_SUCCESS_MESSAGE: &str = "successful";
pub const MAIL_SENT_MESSAGE: &str = "A mail has been sent to your email address";

/// HTTP 请求体
#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
    #[serde(rename = "isMobile", alias = "is_mobile", default)]
    pub is_mobile: bool,
}

impl From<ForgotPasswordRequest> for ForgotPasswordCommand {
    fn from(request: ForgotPasswordRequest) -> Self {
        ForgotPasswordCommand::new(request.email, ResetChannel::from_is_mobile(request.is_mobile))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordData {
    pub message: String,
}

pub type ForgotPasswordResponse = ApiResponse<ForgotPasswordData>;

impl ForgotPasswordResponse {
    /// 成功响应，不回显任何凭证
    pub fn mail_sent() -> Self {
        ApiResponse::ok(
            FORGOT_PASSWORD_SUCCESS_MESSAGE,
            ForgotPasswordData {
                message: MAIL_SENT_MESSAGE.to_string(),
            },
        )
    }
}
