//! Storage backend abstraction for the document store.
//!
//! A backend persists exactly one [`Document`]. It knows nothing about resources,
//! ids or merge rules; it only reads the whole aggregate and writes the whole
//! aggregate back.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`DynStoreBackend`]: A trait for dynamic dispatch over backend implementations
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use comanda_core::backend::StoreBackend;
//!
//! let backend = MyBackendImpl::new();
//!
//! let mut document = backend.load_document().await.unwrap_or_default();
//! document.insert("menu", serde_json::json!([]));
//! backend.save_document(&document).await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{document::Document, error::DocumentStoreResult};

/// Abstract interface for whole-document storage backends.
///
/// # Failure policy
///
/// Loading never fails. A backend that cannot produce a document (nothing
/// configured, nothing persisted yet, unreadable or unparsable contents) returns
/// `None`, and the caller substitutes its default document. Backends are expected
/// to log why they returned `None`.
///
/// Saving does fail, and the error is propagated to the caller unchanged. No
/// retry is attempted at this layer.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. They are not required to serialize
/// concurrent saves; [`DocumentStore`](crate::store::DocumentStore) does that.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Reads and parses the full persisted document.
    async fn load_document(&self) -> Option<Document>;

    /// Replaces the persisted document with `document`.
    async fn save_document(&self, document: &Document) -> DocumentStoreResult<()>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(self) -> DocumentStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn load_document(&self) -> Option<Document> {
        <B as StoreBackend>::load_document(*self).await
    }

    async fn save_document(&self, document: &Document) -> DocumentStoreResult<()> {
        <B as StoreBackend>::save_document(*self, document).await
    }
}

#[async_trait]
impl<B> StoreBackend for Arc<B>
where
    B: StoreBackend,
{
    async fn load_document(&self) -> Option<Document> {
        <B as StoreBackend>::load_document(self.as_ref()).await
    }

    async fn save_document(&self, document: &Document) -> DocumentStoreResult<()> {
        <B as StoreBackend>::save_document(self.as_ref(), document).await
    }
}

/// Object-safe mirror of [`StoreBackend`], so a backend can be picked at runtime.
#[async_trait]
pub trait DynStoreBackend: Send + Sync + Debug {
    async fn load_document(&self) -> Option<Document>;
    async fn save_document(&self, document: &Document) -> DocumentStoreResult<()>;
    async fn shutdown_boxed(self: Box<Self>) -> DocumentStoreResult<()>;
}

#[async_trait]
impl<B: StoreBackend + 'static> DynStoreBackend for B {
    async fn load_document(&self) -> Option<Document> {
        StoreBackend::load_document(self).await
    }

    async fn save_document(&self, document: &Document) -> DocumentStoreResult<()> {
        StoreBackend::save_document(self, document).await
    }

    async fn shutdown_boxed(self: Box<Self>) -> DocumentStoreResult<()> {
        StoreBackend::shutdown(*self).await
    }
}

#[async_trait]
impl StoreBackend for Box<dyn DynStoreBackend> {
    async fn load_document(&self) -> Option<Document> {
        DynStoreBackend::load_document(self.as_ref()).await
    }

    async fn save_document(&self, document: &Document) -> DocumentStoreResult<()> {
        DynStoreBackend::save_document(self.as_ref(), document).await
    }

    async fn shutdown(self) -> DocumentStoreResult<()> {
        DynStoreBackend::shutdown_boxed(self).await
    }
}

#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
