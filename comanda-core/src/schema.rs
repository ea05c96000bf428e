//! The closed set of resources a store knows about.
//!
//! Every resource name coming from a caller is checked against a [`Schema`] in one
//! place, [`Schema::resolve`], before the loaded document is touched. Names outside
//! the schema are never looked up, created or renamed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::{
    document::Document,
    error::{DocumentStoreError, DocumentStoreResult},
};

pub const USERS: &str = "users";
pub const MENU: &str = "menu";
pub const ORDERS: &str = "orders";
pub const ACTIVE_ORDERS: &str = "activeOrders";

/// Whether a resource holds many records or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// An ordered array of records, each with a unique integer `id`.
    Collection,
    /// One record without an `id`, merged or replaced wholesale.
    Singleton,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Collection => f.write_str("collection"),
            ResourceKind::Singleton => f.write_str("singleton"),
        }
    }
}

/// A named resource and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSpec {
    name: String,
    kind: ResourceKind,
}

impl ResourceSpec {
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The value a fresh document holds for this resource.
    pub fn empty_value(&self) -> Value {
        match self.kind {
            ResourceKind::Collection => Value::Array(Vec::new()),
            ResourceKind::Singleton => Value::Object(Map::new()),
        }
    }
}

/// Registry mapping each known resource name to its [`ResourceKind`].
///
/// The [`Default`] schema is the point-of-sale layout: `users`, `menu` and
/// `orders` collections plus the `activeOrders` singleton.
///
/// # Example
///
/// ```ignore
/// use comanda_core::schema::{Schema, ResourceKind};
///
/// let schema = Schema::new()
///     .collection("tables")
///     .singleton("settings");
///
/// assert_eq!(schema.resolve("tables")?.kind(), ResourceKind::Collection);
/// assert!(schema.resolve("nope").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    resources: Vec<ResourceSpec>,
}

impl Schema {
    /// Creates a schema with no resources.
    pub fn new() -> Self {
        Self {
            resources: Vec::new(),
        }
    }

    /// The schema of the point-of-sale datastore.
    pub fn point_of_sale() -> Self {
        Self::new()
            .collection(USERS)
            .collection(MENU)
            .collection(ORDERS)
            .singleton(ACTIVE_ORDERS)
    }

    /// Derives a schema from an existing document, typically the bundled template.
    ///
    /// Arrays become collections and objects become singletons. Top-level values of
    /// any other type are not addressable and are skipped.
    pub fn infer(document: &Document) -> Self {
        let resources = document
            .as_map()
            .iter()
            .filter_map(|(name, value)| match value {
                Value::Array(_) => Some(ResourceSpec::new(name.clone(), ResourceKind::Collection)),
                Value::Object(_) => Some(ResourceSpec::new(name.clone(), ResourceKind::Singleton)),
                _ => None,
            })
            .collect();

        Self { resources }
    }

    /// Adds (or redeclares) a collection resource.
    pub fn collection(self, name: impl Into<String>) -> Self {
        self.with(ResourceSpec::new(name, ResourceKind::Collection))
    }

    /// Adds (or redeclares) a singleton resource.
    pub fn singleton(self, name: impl Into<String>) -> Self {
        self.with(ResourceSpec::new(name, ResourceKind::Singleton))
    }

    fn with(mut self, spec: ResourceSpec) -> Self {
        match self.resources.iter_mut().find(|existing| existing.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.resources.push(spec),
        }
        self
    }

    /// Looks up a resource by name, rejecting names outside the schema.
    pub fn resolve(&self, name: &str) -> DocumentStoreResult<&ResourceSpec> {
        self.resources
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| DocumentStoreError::ResourceNotFound(name.to_string()))
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceSpec> {
        self.resources.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// The document substituted whenever the persisted one cannot be read.
    ///
    /// For the point-of-sale schema this is
    /// `{ "users": [], "menu": [], "orders": [], "activeOrders": {} }`.
    pub fn default_document(&self) -> Document {
        let mut document = Document::new();
        for spec in &self.resources {
            document.insert(spec.name.clone(), spec.empty_value());
        }
        document
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::point_of_sale()
    }
}
