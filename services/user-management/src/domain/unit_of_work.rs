//! Unit of Work 模式
//!
//! 协调一次业务操作内的所有写入，提交或回滚作为一个整体。

use async_trait::async_trait;
use telex_errors::AppResult;

use crate::domain::repositories::UserRepository;

/// Unit of Work trait
///
/// ```ignore
/// let uow = uow_factory.begin().await?;
/// uow.users().update(&user).await?;
/// uow.commit().await?;
/// ```
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// 获取用户 Repository
    fn users(&self) -> &dyn UserRepository;

    /// 提交事务
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// 回滚事务
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Unit of Work 工厂
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    /// 开始新的 Unit of Work
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>>;
}
