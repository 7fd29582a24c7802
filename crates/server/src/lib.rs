//! HTTP service over the recipe chunker.
//!
//! [`build_router`] wires the routes; [`serve`] binds the configured
//! address and runs until Ctrl-C.

pub mod api;
pub mod router;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use recipe_core::Config;
use tracing::info;

pub use router::build_router;
pub use state::AppState;

/// Bind `config.server` and serve until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    config.log_summary();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
