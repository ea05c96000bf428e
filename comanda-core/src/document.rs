//! The persisted aggregate and the records it holds.
//!
//! A [`Document`] maps resource names to either an array of records (a collection
//! resource) or a single record (a singleton resource). It is reconstructed from the
//! backend for every operation and never cached between them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{DocumentStoreError, DocumentStoreResult},
    schema::{ResourceKind, ResourceSpec},
};

/// A single record: field name to arbitrary JSON value.
pub type Record = Map<String, Value>;

/// The entire persisted JSON aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Creates a document with no resources at all.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps a JSON value, which must be an object at the top level.
    pub fn from_value(value: Value) -> DocumentStoreResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DocumentStoreError::InvalidDocument(format!(
                "top-level value must be an object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Parses a document from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> DocumentStoreResult<Self> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    /// Serializes the document with two-space indentation, the layout of the template file.
    pub fn to_pretty_vec(&self) -> DocumentStoreResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.0)?)
    }

    /// Returns the raw value stored under a resource name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Inserts or replaces the raw value stored under a resource name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Borrows the value stored under `spec`, checking it has the declared shape.
    pub fn slot(&self, spec: &ResourceSpec) -> DocumentStoreResult<Slot<'_>> {
        let value = self
            .0
            .get(spec.name())
            .ok_or_else(|| DocumentStoreError::ResourceNotFound(spec.name().to_string()))?;

        match (spec.kind(), value) {
            (ResourceKind::Collection, Value::Array(records)) => Ok(Slot::Collection(records)),
            (ResourceKind::Singleton, Value::Object(record)) => Ok(Slot::Singleton(record)),
            (kind, other) => Err(shape_mismatch(spec.name(), kind, other)),
        }
    }

    /// Mutable counterpart of [`Document::slot`].
    pub fn slot_mut(&mut self, spec: &ResourceSpec) -> DocumentStoreResult<SlotMut<'_>> {
        let value = self
            .0
            .get_mut(spec.name())
            .ok_or_else(|| DocumentStoreError::ResourceNotFound(spec.name().to_string()))?;

        match (spec.kind(), value) {
            (ResourceKind::Collection, Value::Array(records)) => Ok(SlotMut::Collection(records)),
            (ResourceKind::Singleton, Value::Object(record)) => Ok(SlotMut::Singleton(record)),
            (kind, other) => Err(shape_mismatch(spec.name(), kind, other)),
        }
    }
}

/// Read-only view of one resource inside a loaded [`Document`].
#[derive(Debug)]
pub enum Slot<'d> {
    Collection(&'d Vec<Value>),
    Singleton(&'d Record),
}

/// Mutable view of one resource inside a loaded [`Document`].
#[derive(Debug)]
pub enum SlotMut<'d> {
    Collection(&'d mut Vec<Value>),
    Singleton(&'d mut Record),
}

/// Copies every field of `patch` into `base`; fields only present in `base` survive.
pub fn shallow_merge(base: &mut Record, patch: Record) {
    for (field, value) in patch {
        base.insert(field, value);
    }
}

/// Unwraps a request payload, which must be a JSON object.
pub fn payload_record(payload: Value) -> DocumentStoreResult<Record> {
    match payload {
        Value::Object(record) => Ok(record),
        other => Err(DocumentStoreError::InvalidPayload(format!(
            "expected a JSON object, got {}",
            type_name(&other)
        ))),
    }
}

fn shape_mismatch(name: &str, kind: ResourceKind, found: &Value) -> DocumentStoreError {
    DocumentStoreError::InvalidDocument(format!(
        "resource `{name}` is declared as a {kind} but holds {}",
        type_name(found)
    ))
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
