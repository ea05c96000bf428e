//! Tracing initialization for the server binary.

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Installs the global fmt subscriber.
pub fn init_logging(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.verbose >= 1)
        .with_line_number(config.verbose >= 2)
        .init();

    debug!("comanda-server started with verbosity level: {}", config.verbose);
}
