//! User Management Service - 服务入口

use std::net::SocketAddr;

use anyhow::Context;
use telex_config::AppConfig;
use telex_telemetry::{init_metrics, init_tracing, init_tracing_json};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use user_management::api::http::router;
use user_management::startup;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let config = AppConfig::load(&config_dir).context("Failed to load configuration")?;

    if config.telemetry.json {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    info!(app = %config.app_name, env = %config.app_env, "Starting user-management");

    let metrics = init_metrics()?;
    let shutdown = CancellationToken::new();

    let application = startup::build(&config, shutdown.clone()).await?;
    let app = router(application.state.with_metrics(metrics));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    shutdown.cancel();
    if let Err(e) = application.email_worker.await {
        warn!(error = %e, "Email delivery worker terminated abnormally");
    }

    info!("user-management stopped");
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
    shutdown.cancel();
}
