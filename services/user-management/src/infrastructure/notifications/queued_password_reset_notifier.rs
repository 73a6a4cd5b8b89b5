//! 经由邮件队列投递的重置通知

use std::sync::Arc;

use async_trait::async_trait;
use telex_adapter_email::{EmailMessage, EmailTemplate, RenderedEmail};
use telex_errors::AppResult;
use telex_ports::MessageQueue;
use tracing::debug;

use crate::domain::services::{PasswordResetNotifier, ResetMail};

/// 渲染重置邮件并放入发送队列
pub struct QueuedPasswordResetNotifier {
    templates: Arc<EmailTemplate>,
    queue: Arc<dyn MessageQueue<EmailMessage>>,
}

impl QueuedPasswordResetNotifier {
    pub fn new(templates: Arc<EmailTemplate>, queue: Arc<dyn MessageQueue<EmailMessage>>) -> Self {
        Self { templates, queue }
    }

    async fn enqueue(&self, mail: &ResetMail, rendered: RenderedEmail) -> AppResult<()> {
        debug!(to = %mail.email, subject = %mail.subject, "Queueing password reset email");

        self.queue
            .enqueue(EmailMessage {
                to: mail.email.clone(),
                subject: mail.subject.clone(),
                html_body: Some(rendered.html),
                text_body: rendered.text,
            })
            .await
    }
}

#[async_trait]
impl PasswordResetNotifier for QueuedPasswordResetNotifier {
    async fn send_web_reset(&self, mail: &ResetMail, link: &str) -> AppResult<()> {
        let rendered = self
            .templates
            .render_forgot_password(&mail.recipient_name, link, mail.year)?;
        self.enqueue(mail, rendered).await
    }

    async fn send_mobile_reset(&self, mail: &ResetMail, code: &str) -> AppResult<()> {
        let rendered =
            self.templates
                .render_forgot_password_mobile(&mail.recipient_name, code, mail.year)?;
        self.enqueue(mail, rendered).await
    }
}
