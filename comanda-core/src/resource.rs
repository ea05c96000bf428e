//! Handles bound to a single resource name.
//!
//! A [`Resource`] is a thin convenience over [`DocumentStore`]: it remembers the
//! resource name so callers working with one resource do not repeat it.
//!
//! # Example
//!
//! ```ignore
//! use serde_json::json;
//!
//! let orders = store.resource("orders");
//! let order = orders.create(json!({ "table": 4, "items": [] })).await?;
//! orders.update("1", json!({ "status": "served" })).await?;
//! orders.delete("1").await?;
//! ```

use serde_json::Value;

use crate::{
    backend::StoreBackend,
    error::DocumentStoreResult,
    store::{DeleteAck, DocumentStore},
};

/// A resource name together with a reference to the store that owns it.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the store reference
/// * `B` - The storage backend type
#[derive(Debug)]
pub struct Resource<'a, B: StoreBackend> {
    name: String,
    store: &'a DocumentStore<B>,
}

impl<'a, B: StoreBackend> Resource<'a, B> {
    pub(crate) fn new(name: String, store: &'a DocumentStore<B>) -> Self {
        Self { name, store }
    }

    /// Returns the name of this resource.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// See [`DocumentStore::list`].
    pub async fn list(&self) -> DocumentStoreResult<Value> {
        self.store.list(&self.name).await
    }

    /// See [`DocumentStore::get`].
    pub async fn get(&self, id: &str) -> DocumentStoreResult<Value> {
        self.store.get(&self.name, id).await
    }

    /// See [`DocumentStore::create`].
    pub async fn create(&self, payload: Value) -> DocumentStoreResult<Value> {
        self.store.create(&self.name, payload).await
    }

    /// See [`DocumentStore::update`].
    pub async fn update(&self, id: &str, payload: Value) -> DocumentStoreResult<Value> {
        self.store.update(&self.name, id, payload).await
    }

    /// See [`DocumentStore::delete`].
    pub async fn delete(&self, id: &str) -> DocumentStoreResult<DeleteAck> {
        self.store.delete(&self.name, id).await
    }

    /// See [`DocumentStore::replace_singleton`].
    pub async fn replace(&self, payload: Value) -> DocumentStoreResult<Value> {
        self.store.replace_singleton(&self.name, payload).await
    }
}
