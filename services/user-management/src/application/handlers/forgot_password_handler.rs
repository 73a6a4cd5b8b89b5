//! 忘记密码处理器
//!
//! 查找用户 → 生成凭证（Web 渠道额外签发访问令牌）→ 投递通知 → 持久化。
//! 投递先于持久化完成，因此持久化失败时邮件已经发出。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use telex_config::PasswordResetConfig;
use telex_cqrs_core::CommandHandler;
use telex_errors::{AppResult, DomainResult};
use tracing::{error, info, warn};

use crate::application::commands::ForgotPasswordCommand;
use crate::application::dto::ForgotPasswordResponse;
use crate::domain::repositories::UserRepository;
use crate::domain::services::{
    PasswordResetNotifier, ResetCodeGenerator, ResetMail, ResetTokenIssuer,
};
use crate::domain::unit_of_work::UnitOfWorkFactory;
use crate::domain::user::User;
use crate::domain::value_objects::{Email, ResetCredential};
use crate::error::UserError;
use crate::infrastructure::observability::metrics::{ResetOutcome, record_password_reset_request};

/// 处理器运行参数
#[derive(Debug, Clone)]
pub struct ForgotPasswordSettings {
    pub frontend_url: String,
    pub token_expires_minutes: i64,
    pub email_subject: String,
}

impl From<&PasswordResetConfig> for ForgotPasswordSettings {
    fn from(config: &PasswordResetConfig) -> Self {
        Self {
            frontend_url: config.frontend_url.clone(),
            token_expires_minutes: config.token_expires_minutes,
            email_subject: config.email_subject.clone(),
        }
    }
}

/// 忘记密码处理器
pub struct ForgotPasswordHandler {
    user_repo: Arc<dyn UserRepository>,
    uow_factory: Arc<dyn UnitOfWorkFactory>,
    token_issuer: Arc<dyn ResetTokenIssuer>,
    notifier: Arc<dyn PasswordResetNotifier>,
    code_generator: ResetCodeGenerator,
    settings: ForgotPasswordSettings,
}

impl ForgotPasswordHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        token_issuer: Arc<dyn ResetTokenIssuer>,
        notifier: Arc<dyn PasswordResetNotifier>,
        settings: ForgotPasswordSettings,
    ) -> Self {
        Self {
            user_repo,
            uow_factory,
            token_issuer,
            notifier,
            code_generator: ResetCodeGenerator::new(),
            settings,
        }
    }

    /// `{frontend_url}/reset-password?access_token={token}`
    pub fn reset_link(&self, access_token: &str) -> String {
        format!(
            "{}/reset-password?access_token={}",
            self.settings.frontend_url.trim_end_matches('/'),
            urlencoding::encode(access_token)
        )
    }

    async fn issue(
        &self,
        command: &ForgotPasswordCommand,
    ) -> AppResult<Result<ForgotPasswordResponse, UserError>> {
        let email = match Email::new(&command.email) {
            Ok(email) => email,
            Err(e) => {
                info!(error = %e, "Rejected forgot password request");
                return Ok(Err(UserError::InvalidEmail));
            }
        };

        let Some(mut user) = self.user_repo.find_by_email(&email).await? else {
            info!(email = %email, "Forgot password requested for unknown email");
            return Ok(Err(UserError::UserWithEmailNotFound));
        };

        let credential = self.code_generator.generate(command.channel);
        user.assign_reset_credential(&credential);

        let mail = ResetMail {
            recipient_name: user.display_name(),
            email: user.email.to_string(),
            subject: self.settings.email_subject.clone(),
            year: Utc::now().year(),
        };

        match &credential {
            ResetCredential::WebToken(_) => {
                let access_token = self
                    .token_issuer
                    .sign(&user, self.settings.token_expires_minutes)?;
                let link = self.reset_link(&access_token);
                self.notifier.send_web_reset(&mail, &link).await?;
            }
            ResetCredential::MobileCode(code) => {
                self.notifier.send_mobile_reset(&mail, code).await?;
            }
        }

        user.mark_reset_issued(Utc::now());
        self.persist(&user).await?;

        info!(
            user_id = %user.id,
            channel = %command.channel,
            "Password reset credential issued"
        );

        Ok(Ok(ForgotPasswordResponse::mail_sent()))
    }

    async fn persist(&self, user: &User) -> AppResult<()> {
        let uow = self.uow_factory.begin().await?;

        if let Err(e) = uow.users().update(user).await {
            if let Err(rollback_err) = uow.rollback().await {
                warn!(error = %rollback_err, "Failed to roll back forgot password update");
            }
            return Err(e);
        }

        uow.commit().await
    }
}

#[async_trait]
impl CommandHandler<ForgotPasswordCommand> for ForgotPasswordHandler {
    async fn handle(
        &self,
        command: ForgotPasswordCommand,
    ) -> AppResult<DomainResult<ForgotPasswordResponse>> {
        let channel = command.channel;

        match self.issue(&command).await {
            Ok(Ok(response)) => {
                record_password_reset_request(channel, ResetOutcome::Sent);
                Ok(Ok(response))
            }
            Ok(Err(failure)) => {
                let outcome = match failure {
                    UserError::UserWithEmailNotFound => ResetOutcome::NotFound,
                    UserError::InvalidEmail => ResetOutcome::InvalidEmail,
                };
                record_password_reset_request(channel, outcome);
                Ok(Err(failure.into()))
            }
            Err(e) => {
                error!(
                    email = %command.email,
                    channel = %channel,
                    error = %e,
                    "Forgot password error"
                );
                record_password_reset_request(channel, ResetOutcome::Failed);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use crate::domain::services::MockResetTokenIssuer;
    use crate::domain::value_objects::ResetChannel;
    use crate::infrastructure::persistence::{InMemoryUnitOfWorkFactory, InMemoryUserStore};
    use telex_errors::AppError;

    struct SilentNotifier;

    #[async_trait]
    impl PasswordResetNotifier for SilentNotifier {
        async fn send_web_reset(&self, _mail: &ResetMail, _link: &str) -> AppResult<()> {
            Ok(())
        }

        async fn send_mobile_reset(&self, _mail: &ResetMail, _code: &str) -> AppResult<()> {
            Ok(())
        }
    }

    fn settings() -> ForgotPasswordSettings {
        ForgotPasswordSettings {
            frontend_url: "https://app.telex.im/".to_string(),
            token_expires_minutes: 10,
            email_subject: "Telex Boilerplate".to_string(),
        }
    }

    fn handler(
        user_repo: Arc<dyn UserRepository>,
        token_issuer: Arc<dyn ResetTokenIssuer>,
    ) -> ForgotPasswordHandler {
        let store = Arc::new(InMemoryUserStore::new());
        ForgotPasswordHandler::new(
            user_repo,
            Arc::new(InMemoryUnitOfWorkFactory::new(store)),
            token_issuer,
            Arc::new(SilentNotifier),
            settings(),
        )
    }

    #[test]
    fn test_reset_link_encodes_token() {
        let handler = handler(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockResetTokenIssuer::new()),
        );

        assert_eq!(
            handler.reset_link("a.b+c/d"),
            "https://app.telex.im/reset-password?access_token=a.b%2Bc%2Fd"
        );
    }

    #[tokio::test]
    async fn test_invalid_email_skips_lookup() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_email().never();

        let handler = handler(Arc::new(user_repo), Arc::new(MockResetTokenIssuer::new()));
        let result = handler
            .handle(ForgotPasswordCommand::new("not-an-email", ResetChannel::Web))
            .await
            .unwrap();

        assert_eq!(result.unwrap_err().reason(), "User with email does not exist");
    }

    #[tokio::test]
    async fn test_lookup_error_is_returned_unchanged() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email()
            .returning(|_| Err(AppError::database("connection reset")));

        let handler = handler(Arc::new(user_repo), Arc::new(MockResetTokenIssuer::new()));
        let result = handler
            .handle(ForgotPasswordCommand::new("a@b.com", ResetChannel::Mobile))
            .await;

        assert_eq!(
            result.unwrap_err().to_string(),
            AppError::database("connection reset").to_string()
        );
    }

    #[tokio::test]
    async fn test_signing_error_is_returned_unchanged() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_email().returning(|email| {
            Ok(Some(User::new(email.clone(), Some("Ada".to_string()), None)))
        });
        user_repo.expect_update().never();

        let mut token_issuer = MockResetTokenIssuer::new();
        token_issuer
            .expect_sign()
            .withf(|user, minutes| user.password_reset_token.is_some() && *minutes == 10)
            .returning(|_, _| Err(AppError::internal("Failed to generate token: bad key")));

        let handler = handler(Arc::new(user_repo), Arc::new(token_issuer));
        let result = handler
            .handle(ForgotPasswordCommand::new("a@b.com", ResetChannel::Web))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Internal(ref msg)) if msg == "Failed to generate token: bad key"
        ));
    }
}
