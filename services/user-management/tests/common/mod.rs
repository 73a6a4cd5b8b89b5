//! 集成测试公共工具

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use telex_auth_core::TokenService;
use telex_errors::AppResult;
use tokio::sync::Mutex;
use user_management::application::handlers::{ForgotPasswordHandler, ForgotPasswordSettings};
use user_management::domain::repositories::UserRepository;
use user_management::domain::services::{PasswordResetNotifier, ResetMail};
use user_management::domain::unit_of_work::UnitOfWorkFactory;
use user_management::domain::user::User;
use user_management::domain::value_objects::Email;
use user_management::infrastructure::persistence::{InMemoryUnitOfWorkFactory, InMemoryUserStore};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const FRONTEND_URL: &str = "https://app.telex.im";

/// 记录下来的一次投递
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Web { mail: ResetMail, link: String },
    Mobile { mail: ResetMail, code: String },
}

#[derive(Default)]
pub struct RecordingNotifier {
    deliveries: Mutex<Vec<Delivery>>,
}

impl RecordingNotifier {
    pub async fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().await.clone()
    }
}

#[async_trait]
impl PasswordResetNotifier for RecordingNotifier {
    async fn send_web_reset(&self, mail: &ResetMail, link: &str) -> AppResult<()> {
        self.deliveries.lock().await.push(Delivery::Web {
            mail: mail.clone(),
            link: link.to_string(),
        });
        Ok(())
    }

    async fn send_mobile_reset(&self, mail: &ResetMail, code: &str) -> AppResult<()> {
        self.deliveries.lock().await.push(Delivery::Mobile {
            mail: mail.clone(),
            code: code.to_string(),
        });
        Ok(())
    }
}

pub fn settings() -> ForgotPasswordSettings {
    ForgotPasswordSettings {
        frontend_url: FRONTEND_URL.to_string(),
        token_expires_minutes: 10,
        email_subject: "Telex Boilerplate".to_string(),
    }
}

pub fn token_service() -> TokenService {
    TokenService::new(JWT_SECRET, "telex", "telex-web")
}

/// 使用内存存储的测试夹具
pub struct Fixture {
    pub store: Arc<InMemoryUserStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub handler: ForgotPasswordHandler,
}

impl Fixture {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryUserStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = handler_with(store.clone(), notifier.clone());

        Self {
            store,
            notifier,
            handler,
        }
    }

    pub async fn seed_user(&self, email: &str, first_name: Option<&str>) -> User {
        let user = User::new(
            Email::new(email).unwrap(),
            first_name.map(str::to_string),
            None,
        );
        self.store.save(&user).await.unwrap();
        user
    }

    pub async fn stored(&self, user: &User) -> User {
        self.store.find_by_id(&user.id).await.unwrap().unwrap()
    }
}

pub fn handler_with(
    store: Arc<InMemoryUserStore>,
    notifier: Arc<dyn PasswordResetNotifier>,
) -> ForgotPasswordHandler {
    let uow_factory: Arc<dyn UnitOfWorkFactory> = Arc::new(InMemoryUnitOfWorkFactory::new(store.clone()));

    ForgotPasswordHandler::new(
        store,
        uow_factory,
        Arc::new(token_service()),
        notifier,
        settings(),
    )
}
