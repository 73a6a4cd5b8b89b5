//! Email 适配器
//!
//! 提供邮件发送功能，支持：
//! - SMTP 邮件发送
//! - 模板渲染
//! - 进程内发送队列与后台投递

mod client;
mod logging;
mod queue;
mod template;

pub use client::{EmailClient, EmailMessage};
pub use logging::LoggingEmailSender;
pub use queue::{EmailDeliveryWorker, EmailQueue};
pub use template::{EmailTemplate, RenderedEmail};

// 重新导出 EmailConfig
pub use telex_config::EmailConfig;

use telex_errors::AppResult;

/// 邮件发送接口
#[async_trait::async_trait]
pub trait EmailSender: Send + Sync {
    /// 发送纯文本邮件
    async fn send_text_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;

    /// 发送 HTML 邮件
    async fn send_html_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: Option<&str>,
    ) -> AppResult<()>;

    /// 按消息内容选择纯文本或 HTML 发送
    async fn send_message(&self, message: &EmailMessage) -> AppResult<()> {
        match &message.html_body {
            Some(html) => {
                self.send_html_email(&message.to, &message.subject, html, Some(&message.text_body))
                    .await
            }
            None => {
                self.send_text_email(&message.to, &message.subject, &message.text_body)
                    .await
            }
        }
    }
}
