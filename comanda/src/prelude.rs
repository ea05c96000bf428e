//! Convenient re-exports of commonly used types from comanda.
//!
//! ```ignore
//! use comanda::prelude::*;
//! ```

pub use comanda_core::{
    backend::{DynStoreBackend, StoreBackend, StoreBackendBuilder},
    document::{Document, Record},
    error::{DocumentStoreError, DocumentStoreResult},
    id::RecordId,
    resource::Resource,
    schema::{ResourceKind, ResourceSpec, Schema},
    store::{DeleteAck, DocumentStore},
};
