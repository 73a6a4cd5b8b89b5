//! HTTP 共享状态

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use telex_cqrs_core::InMemoryCommandBus;

#[derive(Clone)]
pub struct AppState {
    pub command_bus: Arc<InMemoryCommandBus>,
    /// 未配置数据库时为 `None`
    pub db_pool: Option<PgPool>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(command_bus: Arc<InMemoryCommandBus>) -> Self {
        Self {
            command_bus,
            db_pool: None,
            metrics: None,
        }
    }

    pub fn with_db_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
