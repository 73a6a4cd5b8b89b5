//! PostgreSQL 用户 Repository 实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use telex_common::{AuditInfo, UserId};
use telex_errors::{AppError, AppResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repositories::UserRepository;
use crate::domain::user::User;
use crate::domain::value_objects::Email;

pub(crate) const SELECT_USER_BY_ID: &str = r#"
    SELECT id, email, first_name, last_name, password_reset_token, password_reset_token_time,
           created_at, created_by, updated_at, updated_by
    FROM users
    WHERE id = $1
"#;

pub(crate) const SELECT_USER_BY_EMAIL: &str = r#"
    SELECT id, email, first_name, last_name, password_reset_token, password_reset_token_time,
           created_at, created_by, updated_at, updated_by
    FROM users
    WHERE lower(email) = $1
"#;

pub(crate) const INSERT_USER: &str = r#"
    INSERT INTO users (id, email, first_name, last_name, password_reset_token,
                       password_reset_token_time, created_at, created_by, updated_at, updated_by)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
"#;

pub(crate) const UPDATE_USER: &str = r#"
    UPDATE users
    SET email = $2, first_name = $3, last_name = $4, password_reset_token = $5,
        password_reset_token_time = $6, updated_at = $7, updated_by = $8
    WHERE id = $1
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(SELECT_USER_BY_ID)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(SELECT_USER_BY_EMAIL)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to find user: {}", e)))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        bind_insert(sqlx::query(INSERT_USER), user)
            .execute(&self.pool)
            .await
            .map_err(map_insert_error)?;

        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let result = bind_update(sqlx::query(UPDATE_USER), user)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update user: {}", e)))?;

        ensure_updated(result.rows_affected(), user)
    }
}

type PgQuery<'q> = sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>;

pub(crate) fn bind_insert<'q>(query: PgQuery<'q>, user: &'q User) -> PgQuery<'q> {
    query
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_reset_token)
        .bind(user.password_reset_token_time)
        .bind(user.audit_info.created_at)
        .bind(user.audit_info.created_by.as_ref().map(|u| u.0))
        .bind(user.audit_info.updated_at)
        .bind(user.audit_info.updated_by.as_ref().map(|u| u.0))
}

pub(crate) fn bind_update<'q>(query: PgQuery<'q>, user: &'q User) -> PgQuery<'q> {
    query
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_reset_token)
        .bind(user.password_reset_token_time)
        .bind(user.audit_info.updated_at)
        .bind(user.audit_info.updated_by.as_ref().map(|u| u.0))
}

pub(crate) fn map_insert_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::conflict("User with this email already exists")
        }
        _ => AppError::database(format!("Failed to save user: {}", e)),
    }
}

pub(crate) fn ensure_updated(rows_affected: u64, user: &User) -> AppResult<()> {
    if rows_affected == 0 {
        return Err(AppError::not_found(format!("User {} not found", user.id)));
    }
    Ok(())
}

#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    id: Uuid,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    password_reset_token: Option<String>,
    password_reset_token_time: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    created_by: Option<Uuid>,
    updated_at: DateTime<Utc>,
    updated_by: Option<Uuid>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> AppResult<User> {
        let email = Email::new(&self.email).map_err(|e| {
            AppError::database(format!("Invalid email in database for user {}: {}", self.id, e))
        })?;

        Ok(User {
            id: UserId::from_uuid(self.id),
            email,
            first_name: self.first_name,
            last_name: self.last_name,
            password_reset_token: self.password_reset_token,
            password_reset_token_time: self.password_reset_token_time,
            audit_info: AuditInfo {
                created_at: self.created_at,
                created_by: self.created_by.map(UserId::from_uuid),
                updated_at: self.updated_at,
                updated_by: self.updated_by.map(UserId::from_uuid),
            },
        })
    }
}
