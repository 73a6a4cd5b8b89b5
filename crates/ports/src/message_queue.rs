//! Message Queue trait 定义

use async_trait::async_trait;
use telex_errors::AppResult;

/// 出站消息队列
///
/// `enqueue` 成功只表示消息已被队列接收，投递由消费者负责。
#[async_trait]
pub trait MessageQueue<M: Send + 'static>: Send + Sync {
    /// 入队消息
    async fn enqueue(&self, message: M) -> AppResult<()>;
}
