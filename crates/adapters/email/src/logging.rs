//! 仅记录日志的邮件发送器（未启用 SMTP 时使用）

use crate::EmailSender;
use telex_errors::AppResult;
use tracing::info;

pub struct LoggingEmailSender;

#[async_trait::async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send_text_email(&self, to: &str, subject: &str, _body: &str) -> AppResult<()> {
        info!(to = %to, subject = %subject, "SMTP disabled, text email dropped");
        Ok(())
    }

    async fn send_html_email(
        &self,
        to: &str,
        subject: &str,
        _html_body: &str,
        _text_body: Option<&str>,
    ) -> AppResult<()> {
        info!(to = %to, subject = %subject, "SMTP disabled, HTML email dropped");
        Ok(())
    }
}
