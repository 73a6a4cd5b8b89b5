//! Command Bus

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use telex_errors::{AppError, AppResult};
use tracing::debug;

use crate::{Command, CommandHandler};

/// Command Bus trait
#[async_trait]
pub trait CommandBus: Send + Sync {
    async fn dispatch<C: Command + 'static>(&self, command: C) -> AppResult<C::Result>;
}

/// 进程内 Command Bus
///
/// 每种命令类型只注册一个处理器，按 `TypeId` 查找。
#[derive(Default)]
pub struct InMemoryCommandBus {
    handlers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl InMemoryCommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册命令处理器，重复注册时覆盖旧的处理器
    pub fn register<C: Command + 'static>(&mut self, handler: Arc<dyn CommandHandler<C>>) {
        self.handlers.insert(TypeId::of::<C>(), Box::new(handler));
    }

    pub fn with_handler<C: Command + 'static>(mut self, handler: Arc<dyn CommandHandler<C>>) -> Self {
        self.register(handler);
        self
    }

    pub fn is_registered<C: Command + 'static>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<C>())
    }

    fn handler_for<C: Command + 'static>(&self) -> AppResult<Arc<dyn CommandHandler<C>>> {
        self.handlers
            .get(&TypeId::of::<C>())
            .and_then(|h| h.downcast_ref::<Arc<dyn CommandHandler<C>>>())
            .cloned()
            .ok_or_else(|| {
                AppError::internal(format!("No handler registered for {}", type_name::<C>()))
            })
    }
}

#[async_trait]
impl CommandBus for InMemoryCommandBus {
    async fn dispatch<C: Command + 'static>(&self, command: C) -> AppResult<C::Result> {
        let command_name = type_name::<C>();
        let handler = self.handler_for::<C>()?;

        debug!(command = command_name, "Executing command");
        let result = handler.handle(command).await;

        match &result {
            Ok(_) => debug!(command = command_name, "Command executed successfully"),
            Err(e) => debug!(command = command_name, error = %e, "Command failed"),
        }

        result
    }
}
