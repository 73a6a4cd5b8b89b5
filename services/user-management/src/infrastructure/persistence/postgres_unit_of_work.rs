//! PostgreSQL Unit of Work 实现
//!
//! 使用 SQLx Transaction 提供事务协调能力。

use std::sync::Arc;

use async_trait::async_trait;
use telex_common::UserId;
use telex_errors::{AppError, AppResult};
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;

use super::postgres_user_repository::{
    INSERT_USER, SELECT_USER_BY_EMAIL, SELECT_USER_BY_ID, UPDATE_USER, UserRow, bind_insert,
    bind_update, ensure_updated, map_insert_error,
};
use crate::domain::repositories::UserRepository;
use crate::domain::unit_of_work::{UnitOfWork, UnitOfWorkFactory};
use crate::domain::user::User;
use crate::domain::value_objects::Email;

/// 共享事务类型
type SharedTx = Arc<Mutex<Option<Transaction<'static, Postgres>>>>;

/// PostgreSQL Unit of Work 工厂
pub struct PostgresUnitOfWorkFactory {
    pool: PgPool,
}

impl PostgresUnitOfWorkFactory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWorkFactory for PostgresUnitOfWorkFactory {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        let tx = Arc::new(Mutex::new(Some(tx)));

        Ok(Box::new(PostgresUnitOfWork {
            tx: tx.clone(),
            user_repo: TxUserRepository { tx },
        }))
    }
}

/// PostgreSQL Unit of Work
pub struct PostgresUnitOfWork {
    tx: SharedTx,
    user_repo: TxUserRepository,
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    fn users(&self) -> &dyn UserRepository {
        &self.user_repo
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let tx = self
            .tx
            .lock()
            .await
            .take()
            .ok_or_else(|| AppError::internal("Transaction already consumed"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {}", e)))
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        let tx = self
            .tx
            .lock()
            .await
            .take()
            .ok_or_else(|| AppError::internal("Transaction already consumed"))?;

        tx.rollback()
            .await
            .map_err(|e| AppError::database(format!("Failed to rollback transaction: {}", e)))
    }
}

/// 使用共享事务的用户 Repository
pub struct TxUserRepository {
    tx: SharedTx,
}

#[async_trait]
impl UserRepository for TxUserRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let row = sqlx::query_as::<_, UserRow>(SELECT_USER_BY_ID)
            .bind(id.0)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let row = sqlx::query_as::<_, UserRow>(SELECT_USER_BY_EMAIL)
            .bind(email.as_str())
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        bind_insert(sqlx::query(INSERT_USER), user)
            .execute(&mut **tx)
            .await
            .map_err(map_insert_error)?;

        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut guard = self.tx.lock().await;
        let tx = guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Transaction consumed"))?;

        let result = bind_update(sqlx::query(UPDATE_USER), user)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to update user: {}", e)))?;

        ensure_updated(result.rows_affected(), user)
    }
}
