//! In-memory document storage backend for comanda.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It is meant for tests and for embedding the resource API without touching disk.
//!
//! # Features
//!
//! - **Thread-safe access** - Snapshot guarded by an async-aware RwLock
//! - **Per-load reconstruction** - Every load parses a fresh copy of the last save
//! - **Failure injection** - Saves can be made to fail on demand
//!
//! # Quick Start
//!
//! ```ignore
//! use comanda::{prelude::*, memory::InMemoryStore};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryStore::builder().build().await?;
//!     let store = DocumentStore::new(backend);
//!
//!     store.create("menu", json!({ "name": "Taco" })).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as comanda_memory;

pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
