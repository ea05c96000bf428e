use clap::Parser;
use tracing::error;

use comanda_server::{ServerConfig, logging::init_logging, serve};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();
    init_logging(&config);

    if let Err(e) = serve(&config).await {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
