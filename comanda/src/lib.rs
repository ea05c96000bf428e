//! Main comanda crate providing a uniform CRUD interface over a shared JSON document.
//!
//! This crate is the primary entry point. It re-exports the core types from
//! `comanda-core` and gives access to the storage backends and, behind the
//! `server` feature, the HTTP surface.
//!
//! # Features
//!
//! - **Closed resource schema** - Collections and singletons declared up front, unknown names rejected
//! - **Whole-document persistence** - The document is reloaded for every operation and saved after every write
//! - **Serialized writes** - Load→mutate→save cycles never interleave within a process
//! - **Multiple backends** - A JSON file backend and an in-memory backend
//!
//! # Quick Start
//!
//! ```ignore
//! use comanda::{prelude::*, file::JsonFileStore};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Seeds the per-user data file from the bundled template on first run
//!     let backend = JsonFileStore::builder().build().await?;
//!     let store = DocumentStore::new(backend);
//!
//!     // Collections get integer ids assigned as max + 1
//!     let taco = store.create("menu", json!({ "name": "Taco", "price": 3 })).await?;
//!
//!     // Updates merge; fields missing from the payload are kept
//!     store.update("menu", &taco["id"].to_string(), json!({ "price": 4 })).await?;
//!
//!     // Singletons can be replaced wholesale
//!     store.replace_singleton("activeOrders", json!({ "table4": [taco["id"].clone()] })).await?;
//!
//!     store.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! When the backend is chosen at runtime, box it as a [`backend::DynStoreBackend`]:
//!
//! ```ignore
//! use comanda::{prelude::*, memory::InMemoryStore};
//!
//! let backend: Box<dyn DynStoreBackend> = Box::new(InMemoryStore::new());
//! let store = DocumentStore::new(backend);
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for tests and embedding
//! - [`file`] - JSON file storage in the per-user data directory (requires `file` feature)

pub mod prelude;

pub use comanda_core::{backend, document, error, id, resource, schema, store};

// Re-export JSON types for convenience
pub use serde_json;

/// In-memory storage backend implementations.
pub mod memory {
    pub use comanda_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// JSON file storage backend implementations.
///
/// This module is only available when the `file` feature is enabled.
#[cfg(feature = "file")]
pub mod file {
    pub use comanda_file::{
        BUNDLED_TEMPLATE, DEFAULT_DB_FILE, JsonFileStore, JsonFileStoreBuilder, Template,
        default_data_dir, initialize,
    };
}

/// HTTP surface.
///
/// This module is only available when the `server` feature is enabled.
#[cfg(feature = "server")]
pub mod server {
    pub use comanda_server::{ServerConfig, SharedStore, router, serve};
}
