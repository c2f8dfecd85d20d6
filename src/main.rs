mod api;
mod app_state;
mod core;
mod domain;
mod errors;
mod routes;
mod scheduler;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::app_state::build_app_state;
use crate::core::config::AppConfig;
use crate::core::logging::init_tracing;
use crate::routes::app_router;
use crate::scheduler::spawn_background_tasks;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let _log_guard = init_tracing(&config)?;

    info!(
        bind_addr = %config.bind_addr,
        backend_url = %config.backend_url,
        "starting ffconsole-core {}",
        env!("CARGO_PKG_VERSION")
    );

    let bind_addr = config.bind_addr;
    let state = build_app_state(config)?;
    let tasks = spawn_background_tasks(&state);

    let app = app_router().with_state(state.clone());
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    state.dashboard.shutdown().await;
    for task in tasks {
        task.abort();
    }
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
