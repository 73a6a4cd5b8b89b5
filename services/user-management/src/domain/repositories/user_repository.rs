//! 用户 Repository trait

use async_trait::async_trait;
use telex_common::UserId;
use telex_errors::AppResult;

use crate::domain::user::User;
use crate::domain::value_objects::Email;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>>;

    /// 根据邮箱查找用户
    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>>;

    /// 保存新用户
    async fn save(&self, user: &User) -> AppResult<()>;

    /// 更新用户
    async fn update(&self, user: &User) -> AppResult<()>;
}
