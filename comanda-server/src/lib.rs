//! HTTP surface for the comanda document store.
//!
//! Exposes the resource operations as a small JSON REST API under `/api`, with
//! permissive CORS so browser front-ends on other origins can call it.
//!
//! ```ignore
//! use clap::Parser;
//! use comanda_server::{ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     serve(&ServerConfig::parse()).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;

use anyhow::Context;
use comanda_core::error::DocumentStoreResult;
use std::sync::Arc;
use tracing::{info, warn};

pub use config::ServerConfig;
pub use routes::{SharedStore, router};

/// Opens the store and serves the API until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let store: SharedStore = Arc::new(
        config
            .open_store()
            .await
            .context("failed to initialize the shared database")?,
    );

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("API server listening on http://{}", addr);

    axum::serve(listener, router(Arc::clone(&store)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");

    shutdown_store(store).await?;

    Ok(())
}

/// Shuts the backend down if this is the last handle to the store.
///
/// Returns whether the backend was shut down.
async fn shutdown_store(store: SharedStore) -> DocumentStoreResult<bool> {
    match Arc::try_unwrap(store) {
        Ok(store) => {
            store.shutdown().await?;
            Ok(true)
        }
        Err(store) => {
            warn!(
                references = Arc::strong_count(&store),
                "store still shared after shutdown, skipping backend shutdown"
            );
            Ok(false)
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
