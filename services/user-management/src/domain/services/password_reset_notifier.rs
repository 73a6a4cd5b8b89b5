//! 重置通知投递

use async_trait::async_trait;
use telex_errors::AppResult;

/// 一封重置邮件的公共部分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetMail {
    pub recipient_name: String,
    pub email: String,
    pub subject: String,
    pub year: i32,
}

/// 把重置凭证交给外部投递渠道
#[async_trait]
pub trait PasswordResetNotifier: Send + Sync {
    /// Web 渠道：邮件中携带重置链接
    async fn send_web_reset(&self, mail: &ResetMail, link: &str) -> AppResult<()>;

    /// 移动渠道：邮件中携带六位验证码
    async fn send_mobile_reset(&self, mail: &ResetMail, code: &str) -> AppResult<()>;
}
