//! User Management Metrics

use metrics::counter;

use crate::domain::value_objects::ResetChannel;

/// 忘记密码请求的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Sent,
    NotFound,
    InvalidEmail,
    Failed,
}

impl ResetOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::NotFound => "not_found",
            Self::InvalidEmail => "invalid_email",
            Self::Failed => "failed",
        }
    }
}

/// 记录一次忘记密码请求
pub fn record_password_reset_request(channel: ResetChannel, outcome: ResetOutcome) {
    let labels = [
        ("channel", channel.as_str().to_string()),
        ("outcome", outcome.as_str().to_string()),
    ];

    counter!("password_reset_requests_total", &labels).increment(1);
}
