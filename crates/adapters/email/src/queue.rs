//! 进程内邮件发送队列
//!
//! 请求路径只负责入队，`EmailDeliveryWorker` 在后台逐条投递。

use std::sync::Arc;

use async_trait::async_trait;
use telex_errors::{AppError, AppResult};
use telex_ports::MessageQueue;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::{EmailMessage, EmailSender};

/// 邮件队列（发送端）
#[derive(Clone)]
pub struct EmailQueue {
    sender: mpsc::Sender<EmailMessage>,
}

impl EmailQueue {
    /// 创建有界队列，返回发送端和投递 worker
    pub fn bounded(
        capacity: usize,
        email_sender: Arc<dyn EmailSender>,
    ) -> (Self, EmailDeliveryWorker) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (
            Self { sender },
            EmailDeliveryWorker {
                receiver,
                email_sender,
            },
        )
    }

    /// 队列是否已关闭（worker 已退出）
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[async_trait]
impl MessageQueue<EmailMessage> for EmailQueue {
    async fn enqueue(&self, message: EmailMessage) -> AppResult<()> {
        debug!(to = %message.to, subject = %message.subject, "Enqueueing email");

        self.sender
            .send(message)
            .await
            .map_err(|_| AppError::external_service("Email queue is closed"))
    }
}

/// 邮件投递 worker
///
/// 每条消息只尝试一次，失败记录日志后继续处理下一条。
pub struct EmailDeliveryWorker {
    receiver: mpsc::Receiver<EmailMessage>,
    email_sender: Arc<dyn EmailSender>,
}

impl EmailDeliveryWorker {
    /// 启动后台投递任务
    pub fn start(mut self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!("Email delivery worker started");

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        info!("Email delivery worker shutting down, draining accepted messages");
                        self.drain().await;
                        break;
                    }
                    message = self.receiver.recv() => {
                        match message {
                            Some(message) => self.deliver(&message).await,
                            None => {
                                info!("Email queue closed, delivery worker exiting");
                                break;
                            }
                        }
                    }
                }
            }
        })
    }

    /// 关闭接收端并投递已入队的消息，之后的 `enqueue` 返回错误
    async fn drain(&mut self) {
        self.receiver.close();
        while let Some(message) = self.receiver.recv().await {
            self.deliver(&message).await;
        }
    }

    async fn deliver(&self, message: &EmailMessage) {
        if let Err(e) = self.email_sender.send_message(message).await {
            error!(
                to = %message.to,
                subject = %message.subject,
                error = %e,
                "Failed to deliver queued email"
            );
        }
    }
}
