//! JSON file storage backend for comanda.
//!
//! The shared datastore is a single JSON file in the per-user application data
//! directory. On first run the file is seeded by copying a template verbatim.
//!
//! # Features
//!
//! - **Whole-file persistence** - Every load reads the file, every save rewrites it
//! - **Atomic replacement** - Saves go through a temporary file and a rename
//! - **Corruption quarantine** - Unparsable files are moved aside instead of overwritten
//! - **First-run bootstrap** - Data directory creation and template seeding
//!
//! # Quick Start
//!
//! ```ignore
//! use comanda::{prelude::*, file::JsonFileStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = JsonFileStore::builder().build().await?;
//!     let store = DocumentStore::new(backend);
//!
//!     println!("{}", store.list("menu").await?);
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as comanda_file;

pub mod bootstrap;
pub mod store;

pub use bootstrap::{BUNDLED_TEMPLATE, DEFAULT_DB_FILE, Template, default_data_dir, initialize};
pub use store::{JsonFileStore, JsonFileStoreBuilder};
