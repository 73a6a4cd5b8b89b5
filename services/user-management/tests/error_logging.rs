//! 通过命令总线分发时的错误日志数量

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use common::{Fixture, handler_with};
use telex_cqrs_core::{CommandBus, InMemoryCommandBus};
use telex_errors::{AppError, AppResult};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use user_management::application::commands::ForgotPasswordCommand;
use user_management::domain::services::{PasswordResetNotifier, ResetMail};
use user_management::domain::value_objects::ResetChannel;

/// 统计 ERROR 级别事件
#[derive(Clone, Default)]
struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

struct BrokenQueueNotifier;

#[async_trait]
impl PasswordResetNotifier for BrokenQueueNotifier {
    async fn send_web_reset(&self, _mail: &ResetMail, _link: &str) -> AppResult<()> {
        Err(AppError::external_service("Email queue is closed"))
    }

    async fn send_mobile_reset(&self, _mail: &ResetMail, _code: &str) -> AppResult<()> {
        Err(AppError::external_service("Email queue is closed"))
    }
}

#[tokio::test]
async fn infrastructure_failure_is_logged_once_per_dispatch() {
    let counter = ErrorCounter::default();
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(counter.clone()));

    let fixture = Fixture::new();
    fixture.seed_user("a@b.com", None).await;
    let handler = handler_with(fixture.store.clone(), Arc::new(BrokenQueueNotifier));
    let bus = InMemoryCommandBus::new().with_handler::<ForgotPasswordCommand>(Arc::new(handler));

    let result = bus
        .dispatch(ForgotPasswordCommand::new("a@b.com", ResetChannel::Web))
        .await;

    assert!(matches!(result, Err(AppError::ExternalService(_))));
    assert_eq!(counter.count(), 1);
}

#[tokio::test]
async fn unknown_email_is_not_logged_as_error() {
    let counter = ErrorCounter::default();
    let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(counter.clone()));

    let fixture = Fixture::new();
    let bus = InMemoryCommandBus::new()
        .with_handler::<ForgotPasswordCommand>(Arc::new(fixture.handler));

    let result = bus
        .dispatch(ForgotPasswordCommand::new("ghost@x.com", ResetChannel::Web))
        .await
        .unwrap();

    assert!(result.is_err());
    assert_eq!(counter.count(), 0);
}
