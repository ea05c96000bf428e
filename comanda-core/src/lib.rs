//! Core of the comanda document store: a uniform CRUD interface over one shared JSON document.
//!
//! This crate provides:
//!
//! - **Document model** ([`document`]) - The persisted aggregate and its records
//! - **Resource schema** ([`schema`]) - The closed registry of collection and singleton resources
//! - **Record identity** ([`id`]) - Integer ids, their comparison rule and assignment
//! - **Store backend abstraction** ([`backend`]) - Traits for whole-document persistence
//! - **Resource operations** ([`store`], [`resource`]) - List, get, create, update, delete, replace
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use comanda_core::store::DocumentStore;
//! use comanda_memory::InMemoryStore;
//! use serde_json::json;
//!
//! let store = DocumentStore::new(InMemoryStore::new());
//!
//! let user = store.create("users", json!({ "name": "Ana", "role": "waiter" })).await?;
//! assert_eq!(user["id"], 1);
//!
//! store.update("users", "1", json!({ "role": "manager" })).await?;
//! store.replace_singleton("activeOrders", json!({ "table4": [1, 2] })).await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as comanda_core;

pub mod backend;
pub mod document;
pub mod error;
pub mod id;
pub mod resource;
pub mod schema;
pub mod store;
