pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::config::{DatabaseConfig, StoreBackend};

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;
pub use repository::Repository;

/// A stored JSON document. Every document carries a string `id` field.
pub type Document = Map<String, Value>;

/// Errors raised by a document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Corrupt document in {collection}: {reason}")]
    Corrupt {
        collection: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Collections held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Wishlists,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Products, Collection::Wishlists];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Wishlists => "wishlists",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equality conditions on top-level document fields, all of which must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Map<String, Value>,
}

impl Filter {
    /// Matches every document
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: Uuid) -> Self {
        Self::all().eq("id", id.to_string())
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.insert(field.into(), value.into());
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }

    /// JSON object form, suitable for JSONB containment
    pub fn to_value(&self) -> Value {
        Value::Object(self.conditions.clone())
    }
}

/// Storage for JSON documents grouped in collections.
///
/// Single-document operations are atomic; there is no multi-document
/// consistency. `find` returns documents in insertion order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return it as stored
    async fn insert(&self, collection: Collection, document: Document) -> Result<Document, StoreError>;

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>, StoreError>;

    /// Replace the first matching document, returning the new version
    async fn replace_one(
        &self,
        collection: Collection,
        filter: &Filter,
        document: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Delete the first matching document, returning what was removed
    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Prepare backing storage; called once at startup
    async fn bootstrap(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Read the `id` field every stored document must carry
pub fn document_id(collection: Collection, document: &Document) -> Result<Uuid, StoreError> {
    let raw = document
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Corrupt {
            collection: collection.as_str(),
            reason: "document has no string id".to_string(),
        })?;

    Uuid::parse_str(raw).map_err(|e| StoreError::Corrupt {
        collection: collection.as_str(),
        reason: format!("invalid id '{}': {}", raw, e),
    })
}

/// Open the configured store. Postgres pools connect lazily.
pub fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory document store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let url = config
                .url
                .as_deref()
                .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;
            Ok(Arc::new(PgDocumentStore::connect_lazy(url, config)?))
        }
    }
}
