//! 内存用户存储
//!
//! 未配置数据库时使用，也用于测试。Unit of Work 中的写入先暂存，
//! 提交时才写入存储；回滚或直接丢弃则全部作废。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use telex_common::UserId;
use telex_errors::{AppError, AppResult};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::domain::repositories::UserRepository;
use crate::domain::unit_of_work::{UnitOfWork, UnitOfWorkFactory};
use crate::domain::user::User;
use crate::domain::value_objects::Email;

/// 内存用户存储
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    async fn contains(&self, id: &UserId) -> bool {
        self.users.read().await.contains_key(&id.0)
    }

    async fn email_taken(&self, user: &User) -> bool {
        self.users
            .read()
            .await
            .values()
            .any(|existing| existing.email == user.email && existing.id != user.id)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        if self.email_taken(user).await {
            return Err(AppError::conflict(format!(
                "User with email {} already exists",
                user.email
            )));
        }

        self.users.write().await.insert(user.id.0, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id.0) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!("User {} not found", user.id))),
        }
    }
}

/// 内存 Unit of Work 工厂
pub struct InMemoryUnitOfWorkFactory {
    store: Arc<InMemoryUserStore>,
}

impl InMemoryUnitOfWorkFactory {
    pub fn new(store: Arc<InMemoryUserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryUnitOfWorkFactory {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        Ok(Box::new(InMemoryUnitOfWork {
            users: StagedUserRepository {
                store: self.store.clone(),
                staged: Mutex::new(Vec::new()),
            },
        }))
    }
}

/// 暂存写入的用户 Repository
struct StagedUserRepository {
    store: Arc<InMemoryUserStore>,
    staged: Mutex<Vec<User>>,
}

impl StagedUserRepository {
    async fn staged(&self, matches: impl Fn(&User) -> bool) -> Option<User> {
        self.staged
            .lock()
            .await
            .iter()
            .rev()
            .find(|user| matches(user))
            .cloned()
    }
}

#[async_trait]
impl UserRepository for StagedUserRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        match self.staged(|user| &user.id == id).await {
            Some(user) => Ok(Some(user)),
            None => self.store.find_by_id(id).await,
        }
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        match self.staged(|user| &user.email == email).await {
            Some(user) => Ok(Some(user)),
            None => self.store.find_by_email(email).await,
        }
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        if self.store.email_taken(user).await {
            return Err(AppError::conflict(format!(
                "User with email {} already exists",
                user.email
            )));
        }

        self.staged.lock().await.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let staged = self.staged(|staged| staged.id == user.id).await.is_some();
        if !staged && !self.store.contains(&user.id).await {
            return Err(AppError::not_found(format!("User {} not found", user.id)));
        }

        self.staged.lock().await.push(user.clone());
        Ok(())
    }
}

struct InMemoryUnitOfWork {
    users: StagedUserRepository,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let StagedUserRepository { store, staged } = self.users;
        let mut users = store.users.write().await;

        for user in staged.into_inner() {
            users.insert(user.id.0, user);
        }

        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        Ok(())
    }
}
