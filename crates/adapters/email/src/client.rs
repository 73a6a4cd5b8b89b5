//! 邮件客户端实现

use crate::{EmailConfig, EmailSender};
use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use std::time::Duration;
use telex_errors::{AppError, AppResult};
use tracing::{debug, info};

/// 邮件消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: Option<String>,
    pub text_body: String,
}

/// 邮件客户端
pub struct EmailClient {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailClient {
    /// 创建新的邮件客户端
    pub fn new(config: EmailConfig) -> AppResult<Self> {
        let transport = Self::build_transport(&config)?;
        Ok(Self { config, transport })
    }

    /// 构建 SMTP 传输
    fn build_transport(config: &EmailConfig) -> AppResult<AsyncSmtpTransport<Tokio1Executor>> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().clone(),
        );

        let transport = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        }
        .map_err(|e| AppError::internal(format!("Failed to create SMTP transport: {}", e)))?
        .port(config.smtp_port)
        .credentials(credentials)
        .timeout(Some(Duration::from_secs(config.timeout_secs)))
        .build();

        Ok(transport)
    }

    /// 构建邮件消息
    fn build_message(&self, msg: &EmailMessage) -> AppResult<Message> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| AppError::internal(format!("Invalid from address: {}", e)))?;

        let to = msg
            .to
            .parse()
            .map_err(|e| AppError::validation(format!("Invalid to address: {}", e)))?;

        let message_builder = Message::builder().from(from).to(to).subject(&msg.subject);

        let body = if let Some(html) = &msg.html_body {
            // HTML + 纯文本备用
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(header::ContentType::TEXT_PLAIN)
                        .body(msg.text_body.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(header::ContentType::TEXT_HTML)
                        .body(html.clone()),
                )
        } else {
            MultiPart::alternative().singlepart(
                SinglePart::builder()
                    .header(header::ContentType::TEXT_PLAIN)
                    .body(msg.text_body.clone()),
            )
        };

        message_builder
            .multipart(body)
            .map_err(|e| AppError::internal(format!("Failed to build message: {}", e)))
    }

    async fn deliver(&self, message: Message) -> AppResult<()> {
        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::external_service(format!("Failed to send email: {}", e)))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl EmailSender for EmailClient {
    async fn send_text_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        debug!(to = %to, subject = %subject, "Sending text email");

        let msg = EmailMessage {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: None,
            text_body: body.to_string(),
        };

        let message = self.build_message(&msg)?;
        self.deliver(message).await?;

        info!(to = %to, subject = %subject, "Text email sent successfully");
        Ok(())
    }

    async fn send_html_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: Option<&str>,
    ) -> AppResult<()> {
        debug!(to = %to, subject = %subject, "Sending HTML email");

        let msg = EmailMessage {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: Some(html_body.to_string()),
            text_body: text_body.unwrap_or("").to_string(),
        };

        let message = self.build_message(&msg)?;
        self.deliver(message).await?;

        info!(to = %to, subject = %subject, "HTML email sent successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> EmailClient {
        let config = EmailConfig {
            enabled: true,
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            username: "user@example.com".to_string(),
            password: secrecy::Secret::new("password".to_string()),
            from_email: "noreply@example.com".to_string(),
            from_name: "Test".to_string(),
            use_tls: true,
            ..EmailConfig::default()
        };

        EmailClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_build_message() {
        let msg = EmailMessage {
            to: "test@example.com".to_string(),
            subject: "Test Subject".to_string(),
            html_body: Some("<h1>Test</h1>".to_string()),
            text_body: "Test".to_string(),
        };

        assert!(client().build_message(&msg).is_ok());
    }

    #[tokio::test]
    async fn test_build_message_rejects_bad_recipient() {
        let msg = EmailMessage {
            to: "not an address".to_string(),
            subject: "Test Subject".to_string(),
            html_body: None,
            text_body: "Test".to_string(),
        };

        assert!(matches!(
            client().build_message(&msg),
            Err(AppError::Validation(_))
        ));
    }
}
