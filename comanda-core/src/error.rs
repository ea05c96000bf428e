//! Error types and result types for document store operations.
//!
//! Use [`DocumentStoreResult<T>`] as the return type for fallible operations.
//! Failures while *loading* the document are not represented here: backends
//! swallow them and hand back the default document instead.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a document store.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// The resource name is not part of the schema, or the loaded document lacks it.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
    /// No record with the given id exists in the collection.
    /// The first argument is the requested id, the second is the resource name.
    #[error("Item {0} not found in resource {1}")]
    ItemNotFound(String, String),
    /// A collection-only operation was attempted on a singleton resource.
    #[error("Resource not found or not a collection: {0}")]
    NotACollection(String),
    /// A singleton-only operation was attempted on a collection resource.
    #[error("Resource not found or not a singleton: {0}")]
    NotASingleton(String),
    /// The request payload is not a JSON object.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    /// The stored value under a resource does not match its declared kind.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// Serialization/deserialization error when converting the document to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during data directory bootstrap or backend construction.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
    /// An IO error occurred while persisting the document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentStoreError {
    /// Returns `true` for the variants that mean "nothing is addressable here".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DocumentStoreError::ResourceNotFound(_)
                | DocumentStoreError::ItemNotFound(..)
                | DocumentStoreError::NotACollection(_)
                | DocumentStoreError::NotASingleton(_)
        )
    }
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}
