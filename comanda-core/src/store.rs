//! The resource operations.
//!
//! [`DocumentStore`] is the single entry point for reading and writing resources.
//! Every operation reconstructs the document from the backend, resolves the
//! resource name against the [`Schema`], and for writes saves the whole document
//! back before returning.
//!
//! # Consistency
//!
//! Write operations run their load→mutate→save cycle while holding the store's
//! write lock, so two writers in the same process can never interleave and lose
//! each other's changes or hand out the same id. Reads do not take the lock;
//! backends replace the persisted document atomically, so a reader sees either
//! the state before or after a write.
//!
//! # Example
//!
//! ```ignore
//! use comanda_core::store::DocumentStore;
//! use serde_json::json;
//!
//! let store = DocumentStore::new(backend);
//! let created = store.create("menu", json!({ "name": "Taco", "price": 3 })).await?;
//! assert_eq!(created["id"], 1);
//! ```

use mea::mutex::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    backend::StoreBackend,
    document::{Document, Slot, SlotMut, payload_record, shallow_merge},
    error::{DocumentStoreError, DocumentStoreResult},
    id::{ID_FIELD, RecordId},
    resource::Resource,
    schema::{ResourceKind, Schema},
};

/// Acknowledgement returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub success: bool,
    pub message: String,
}

impl Default for DeleteAck {
    fn default() -> Self {
        Self {
            success: true,
            message: "Item deleted".to_string(),
        }
    }
}

/// A document store bound to a specific backend implementation.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
    schema: Schema,
    write_lock: Mutex<()>,
}

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a store over `backend` using the point-of-sale schema.
    pub fn new(backend: B) -> Self {
        Self::with_schema(backend, Schema::default())
    }

    /// Creates a store over `backend` that only addresses the resources in `schema`.
    pub fn with_schema(backend: B, schema: Schema) -> Self {
        Self {
            backend,
            schema,
            write_lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns a handle bound to a single resource name.
    ///
    /// The name is not validated until an operation runs on the handle.
    pub fn resource<'a>(&'a self, name: &str) -> Resource<'a, B> {
        Resource::new(name.to_string(), self)
    }

    /// Reconstructs the document from the backend.
    ///
    /// Falls back to the schema's default document when the backend has nothing
    /// usable; this never fails.
    pub async fn load(&self) -> Document {
        match self.backend.load_document().await {
            Some(document) => document,
            None => {
                debug!("backend returned no document, using defaults");
                self.schema.default_document()
            }
        }
    }

    /// Runs one load→mutate→save cycle under the write lock.
    ///
    /// Nothing is saved when `mutate` returns an error.
    async fn transact<T, F>(&self, mutate: F) -> DocumentStoreResult<T>
    where
        F: FnOnce(&Schema, &mut Document) -> DocumentStoreResult<T> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await;
        let output = mutate(&self.schema, &mut document)?;
        self.backend.save_document(&document).await?;
        trace!("document saved");
        Ok(output)
    }

    /// Returns the full collection or singleton value as stored.
    pub async fn list(&self, resource: &str) -> DocumentStoreResult<Value> {
        let spec = self.schema.resolve(resource)?;
        let document = self.load().await;

        debug!(resource, "list");

        Ok(match document.slot(spec)? {
            Slot::Collection(records) => Value::Array(records.clone()),
            Slot::Singleton(record) => Value::Object(record.clone()),
        })
    }

    /// Returns the record with the given id, or the singleton (ignoring `id`).
    pub async fn get(&self, resource: &str, id: &str) -> DocumentStoreResult<Value> {
        let spec = self.schema.resolve(resource)?;
        let document = self.load().await;

        debug!(resource, id, "get");

        match document.slot(spec)? {
            Slot::Collection(records) => id
                .parse::<RecordId>()
                .ok()
                .and_then(|wanted| records.iter().find(|record| wanted.matches(record)))
                .cloned()
                .ok_or_else(|| item_not_found(id, resource)),
            Slot::Singleton(record) => Ok(Value::Object(record.clone())),
        }
    }

    /// Appends `payload` to a collection under a freshly assigned id.
    ///
    /// Any `id` in the payload is overwritten. On a singleton the payload fields are
    /// merged into the singleton instead, and the payload is echoed back unchanged.
    pub async fn create(&self, resource: &str, payload: Value) -> DocumentStoreResult<Value> {
        debug!(resource, "create");

        self.transact(move |schema, document| {
            let spec = schema.resolve(resource)?;
            let slot = document.slot_mut(spec)?;
            let mut record = payload_record(payload)?;

            match slot {
                SlotMut::Collection(records) => {
                    let id = RecordId::next_for(records.as_slice()).ok_or_else(|| {
                        DocumentStoreError::InvalidDocument(format!(
                            "no ids left in resource `{resource}`"
                        ))
                    })?;
                    record.insert(ID_FIELD.to_string(), id.into());

                    let created = Value::Object(record);
                    records.push(created.clone());

                    debug!(resource, %id, "record created");
                    Ok(created)
                }
                SlotMut::Singleton(singleton) => {
                    shallow_merge(singleton, record.clone());
                    Ok(Value::Object(record))
                }
            }
        })
        .await
    }

    /// Shallow-merges `payload` into the record with the given id, or into the singleton.
    ///
    /// Fields present in `payload` overwrite the stored ones; every other stored field
    /// is preserved.
    pub async fn update(&self, resource: &str, id: &str, payload: Value) -> DocumentStoreResult<Value> {
        debug!(resource, id, "update");

        self.transact(move |schema, document| {
            let spec = schema.resolve(resource)?;
            let slot = document.slot_mut(spec)?;
            let patch = payload_record(payload)?;

            match slot {
                SlotMut::Collection(records) => {
                    let wanted = id
                        .parse::<RecordId>()
                        .map_err(|_| item_not_found(id, resource))?;
                    let record = records
                        .iter_mut()
                        .find(|record| wanted.matches(record))
                        .and_then(Value::as_object_mut)
                        .ok_or_else(|| item_not_found(id, resource))?;

                    shallow_merge(record, patch);
                    Ok(Value::Object(record.clone()))
                }
                SlotMut::Singleton(singleton) => {
                    shallow_merge(singleton, patch);
                    Ok(Value::Object(singleton.clone()))
                }
            }
        })
        .await
    }

    /// Removes every record with the given id from a collection.
    ///
    /// Succeeds (and still saves) when no record matches.
    pub async fn delete(&self, resource: &str, id: &str) -> DocumentStoreResult<DeleteAck> {
        debug!(resource, id, "delete");

        self.transact(move |schema, document| {
            let spec = schema.resolve(resource)?;
            if spec.kind() != ResourceKind::Collection {
                return Err(DocumentStoreError::NotACollection(resource.to_string()));
            }

            if let SlotMut::Collection(records) = document.slot_mut(spec)? {
                if let Ok(wanted) = id.parse::<RecordId>() {
                    let before = records.len();
                    records.retain(|record| !wanted.matches(record));
                    debug!(resource, id, removed = before - records.len(), "records deleted");
                }
            }

            Ok(DeleteAck::default())
        })
        .await
    }

    /// Overwrites a singleton with `payload`; fields absent from `payload` disappear.
    pub async fn replace_singleton(&self, resource: &str, payload: Value) -> DocumentStoreResult<Value> {
        debug!(resource, "replace singleton");

        self.transact(move |schema, document| {
            let spec = schema.resolve(resource)?;
            if spec.kind() != ResourceKind::Singleton {
                return Err(DocumentStoreError::NotASingleton(resource.to_string()));
            }
            let record = payload_record(payload)?;

            let replaced = Value::Object(record);
            document.insert(resource, replaced.clone());
            Ok(replaced)
        })
        .await
    }

    /// Shuts down the underlying backend.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        self.backend.shutdown().await
    }
}

fn item_not_found(id: &str, resource: &str) -> DocumentStoreError {
    DocumentStoreError::ItemNotFound(id.to_string(), resource.to_string())
}
