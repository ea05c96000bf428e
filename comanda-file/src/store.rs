//! JSON file storage implementation for document stores.
//!
//! The whole document lives in one pretty-printed JSON file. Each load reads and
//! parses the file from scratch; each save writes a sibling temporary file and
//! renames it over the original.

use async_trait::async_trait;
use chrono::Utc;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use comanda_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::Document,
    error::DocumentStoreResult,
};

use crate::bootstrap::{DEFAULT_DB_FILE, Template, default_data_dir, initialize};

/// File-backed document storage backend.
///
/// A store without a path ("unset") is valid: it loads nothing and saves nowhere.
///
/// # Example
///
/// ```ignore
/// use comanda_file::JsonFileStore;
/// use comanda_core::{backend::StoreBackendBuilder, store::DocumentStore};
///
/// let backend = JsonFileStore::builder()
///     .data_dir("/var/lib/comanda")
///     .build()
///     .await?;
/// let store = DocumentStore::new(backend);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonFileStore {
    path: Option<PathBuf>,
}

impl JsonFileStore {
    /// Uses `path` as the data file as-is, without seeding it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A store with no data file.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Creates a builder that seeds the data file before handing out the store.
    pub fn builder() -> JsonFileStoreBuilder {
        JsonFileStoreBuilder::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[async_trait]
impl StoreBackend for JsonFileStore {
    async fn load_document(&self) -> Option<Document> {
        let Some(path) = self.path.as_deref() else {
            debug!("no data file configured");
            return None;
        };

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "data file missing");
                return None;
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "error reading shared database");
                return None;
            }
        };

        match Document::from_slice(&bytes) {
            Ok(document) => Some(document),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "shared database is not a valid document");
                quarantine(path).await;
                None
            }
        }
    }

    async fn save_document(&self, document: &Document) -> DocumentStoreResult<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let bytes = document.to_pretty_vec()?;
        replace_file(path, &bytes).await?;

        debug!(path = %path.display(), bytes = bytes.len(), "shared database written");
        Ok(())
    }
}

/// Writes `bytes` to a temporary sibling of `path`, then renames it into place.
async fn replace_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = sibling(path, &format!(".tmp-{}", Uuid::new_v4().simple()));

    let written = async {
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp, path).await
    }
    .await;

    if written.is_err() {
        let _ = tokio::fs::remove_file(&tmp).await;
    }
    written
}

/// Moves an unparsable data file out of the way so a later save cannot clobber it.
async fn quarantine(path: &Path) {
    let target = sibling(
        path,
        &format!(".corrupt-{}", Utc::now().format("%Y%m%dT%H%M%S%.3fZ")),
    );

    match tokio::fs::rename(path, &target).await {
        Ok(()) => warn!(path = %path.display(), moved_to = %target.display(), "corrupt shared database moved aside"),
        Err(err) => warn!(path = %path.display(), error = %err, "could not move corrupt shared database aside"),
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Builder for constructing [`JsonFileStore`] instances.
///
/// `build` resolves the data directory (the per-user data directory unless one is
/// given), creates it, and seeds the data file from the template if it is absent.
#[derive(Debug, Default)]
pub struct JsonFileStoreBuilder {
    data_dir: Option<PathBuf>,
    file_name: Option<String>,
    template: Template,
}

impl JsonFileStoreBuilder {
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for JsonFileStoreBuilder {
    type Backend = JsonFileStore;

    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let data_dir = match self.data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        let file_name = self.file_name.as_deref().unwrap_or(DEFAULT_DB_FILE);

        let path = initialize(&data_dir, file_name, &self.template).await?;
        Ok(JsonFileStore::open(path))
    }
}
