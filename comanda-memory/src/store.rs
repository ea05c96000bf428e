//! In-memory storage implementation for document stores.
//!
//! The document is kept as a serialized JSON snapshot rather than a live value, so
//! every load parses a fresh copy exactly like the file backend does.

use async_trait::async_trait;
use mea::rwlock::RwLock;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use comanda_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::Document,
    error::{DocumentStoreError, DocumentStoreResult},
};

/// Thread-safe in-memory document storage backend.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Multiple clones of the same instance
/// share the same underlying snapshot.
///
/// # Example
///
/// ```ignore
/// use comanda_memory::InMemoryStore;
/// use comanda_core::backend::StoreBackend;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///     assert!(store.load_document().await.is_none());
///
///     store.save_document(&Document::new()).await?;
///     assert!(store.load_document().await.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// The last saved document, serialized. `None` until the first save.
    snapshot: Arc<RwLock<Option<Vec<u8>>>>,
    /// When set, every save fails with a backend error.
    fail_saves: Arc<AtomicBool>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryStore {
    /// Creates a store with nothing persisted; loads yield the caller's default document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `document`.
    pub fn with_document(document: &Document) -> DocumentStoreResult<Self> {
        Ok(Self::with_raw(document.to_pretty_vec()?))
    }

    /// Creates a store holding raw bytes, which need not be a valid document.
    pub fn with_raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Some(bytes.into()))),
            ..Self::default()
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    /// Makes every subsequent save fail (or succeed again).
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves since creation.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn load_document(&self) -> Option<Document> {
        let snapshot = self.snapshot.read().await;
        snapshot
            .as_deref()
            .and_then(|bytes| Document::from_slice(bytes).ok())
    }

    async fn save_document(&self, document: &Document) -> DocumentStoreResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DocumentStoreError::Backend("save rejected".to_string()));
        }

        let bytes = document.to_pretty_vec()?;
        *self.snapshot.write().await = Some(bytes);
        self.saves.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
///
/// # Example
///
/// ```ignore
/// use comanda_memory::InMemoryStore;
/// use comanda_core::backend::StoreBackendBuilder;
///
/// let store = InMemoryStore::builder()
///     .document(template)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct InMemoryStoreBuilder {
    document: Option<Document>,
}

impl InMemoryStoreBuilder {
    /// Seeds the store with `document`.
    pub fn document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        match self.document {
            Some(document) => InMemoryStore::with_document(&document),
            None => Ok(InMemoryStore::new()),
        }
    }
}
