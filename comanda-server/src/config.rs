//! Server configuration from command-line flags and environment variables.

use clap::Parser;
use std::path::PathBuf;

use comanda_core::{
    backend::{DynStoreBackend, StoreBackendBuilder},
    error::DocumentStoreResult,
    store::DocumentStore,
};
use comanda_file::{DEFAULT_DB_FILE, JsonFileStore, Template};

/// Shared JSON datastore served over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "comanda-server", version, about)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "COMANDA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "COMANDA_PORT", default_value_t = 3001)]
    pub port: u16,

    /// Directory holding the shared database (defaults to the per-user data directory)
    #[arg(long, env = "COMANDA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// File name of the shared database inside the data directory
    #[arg(long, env = "COMANDA_DB_FILE", default_value = DEFAULT_DB_FILE)]
    pub db_file: String,

    /// Template copied on first run (defaults to the bundled template)
    #[arg(long, env = "COMANDA_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default tracing filter for the configured verbosity; `RUST_LOG` wins over it.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn template_source(&self) -> Template {
        match &self.template {
            Some(path) => Template::File(path.clone()),
            None => Template::Bundled,
        }
    }

    /// Seeds the data file if needed and opens the store over it.
    ///
    /// The store addresses the resources of the configured template.
    pub async fn open_store(&self) -> DocumentStoreResult<DocumentStore<Box<dyn DynStoreBackend>>> {
        let template = self.template_source();
        let schema = template.schema().await?;

        let mut builder = JsonFileStore::builder()
            .file_name(self.db_file.clone())
            .template(template);
        if let Some(dir) = &self.data_dir {
            builder = builder.data_dir(dir);
        }

        let backend: Box<dyn DynStoreBackend> = Box::new(builder.build().await?);
        Ok(DocumentStore::with_schema(backend, schema))
    }
}
