//! 组装服务依赖

use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use telex_adapter_email::{EmailClient, EmailQueue, EmailSender, EmailTemplate, LoggingEmailSender};
use telex_adapter_postgres::{PostgresConfig, create_pool};
use telex_auth_core::TokenService;
use telex_config::AppConfig;
use telex_cqrs_core::InMemoryCommandBus;
use telex_errors::{AppError, AppResult};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::http::AppState;
use crate::application::commands::ForgotPasswordCommand;
use crate::application::handlers::{ForgotPasswordHandler, ForgotPasswordSettings};
use crate::domain::repositories::UserRepository;
use crate::domain::unit_of_work::UnitOfWorkFactory;
use crate::infrastructure::notifications::QueuedPasswordResetNotifier;
use crate::infrastructure::persistence::{
    InMemoryUnitOfWorkFactory, InMemoryUserStore, PostgresUnitOfWorkFactory, PostgresUserRepository,
};

/// 组装完成的服务
pub struct Application {
    pub state: AppState,
    /// 邮件投递 worker，收到关闭信号后退出
    pub email_worker: JoinHandle<()>,
}

pub async fn build(config: &AppConfig, shutdown: CancellationToken) -> AppResult<Application> {
    let (user_repo, uow_factory, db_pool): (
        Arc<dyn UserRepository>,
        Arc<dyn UnitOfWorkFactory>,
        Option<PgPool>,
    ) = match &config.database {
        Some(database) => {
            let pool = create_pool(&PostgresConfig::from(database)).await?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to run migrations: {}", e)))?;
            info!("Database migrations applied");

            (
                Arc::new(PostgresUserRepository::new(pool.clone())),
                Arc::new(PostgresUnitOfWorkFactory::new(pool.clone())),
                Some(pool),
            )
        }
        None => {
            warn!("No database configured, using in-memory user store");
            let store = Arc::new(InMemoryUserStore::new());
            (
                store.clone(),
                Arc::new(InMemoryUnitOfWorkFactory::new(store)),
                None,
            )
        }
    };

    let email_sender: Arc<dyn EmailSender> = if config.email.enabled {
        info!(smtp_host = %config.email.smtp_host, "SMTP delivery enabled");
        Arc::new(EmailClient::new(config.email.clone())?)
    } else {
        warn!("SMTP delivery disabled, emails will only be logged");
        Arc::new(LoggingEmailSender)
    };

    let (email_queue, worker) = EmailQueue::bounded(config.email.queue_capacity, email_sender);
    let email_worker = worker.start(shutdown);

    let notifier = Arc::new(QueuedPasswordResetNotifier::new(
        Arc::new(EmailTemplate::with_defaults()?),
        Arc::new(email_queue),
    ));

    let token_service = Arc::new(TokenService::new(
        config.jwt.secret.expose_secret(),
        &config.jwt.issuer,
        &config.jwt.audience,
    ));

    let forgot_password = Arc::new(ForgotPasswordHandler::new(
        user_repo,
        uow_factory,
        token_service,
        notifier,
        ForgotPasswordSettings::from(&config.password_reset),
    ));

    let command_bus =
        InMemoryCommandBus::new().with_handler::<ForgotPasswordCommand>(forgot_password);

    let mut state = AppState::new(Arc::new(command_bus));
    if let Some(pool) = db_pool {
        state = state.with_db_pool(pool);
    }

    Ok(Application {
        state,
        email_worker,
    })
}
