use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::{Collection, Document, DocumentStore, Filter, StoreError};

/// Typed view over one collection of a document store
pub struct Repository<T> {
    collection: Collection,
    store: Arc<dyn DocumentStore>,
    _phantom: PhantomData<T>,
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    pub fn new(collection: Collection, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            collection,
            store,
            _phantom: PhantomData,
        }
    }

    pub async fn insert(&self, record: &T) -> Result<T, StoreError> {
        let document = self.encode(record)?;
        let stored = self.store.insert(self.collection, document).await?;
        self.decode(stored)
    }

    pub async fn select_any(&self, filter: Filter) -> Result<Vec<T>, StoreError> {
        self.store
            .find(self.collection, &filter)
            .await?
            .into_iter()
            .map(|document| self.decode(document))
            .collect()
    }

    pub async fn select_one(&self, filter: Filter) -> Result<Option<T>, StoreError> {
        self.store
            .find_one(self.collection, &filter)
            .await?
            .map(|document| self.decode(document))
            .transpose()
    }

    pub async fn update_one(&self, filter: Filter, record: &T) -> Result<Option<T>, StoreError> {
        let document = self.encode(record)?;
        self.store
            .replace_one(self.collection, &filter, document)
            .await?
            .map(|document| self.decode(document))
            .transpose()
    }

    pub async fn delete_one(&self, filter: Filter) -> Result<Option<T>, StoreError> {
        self.store
            .delete_one(self.collection, &filter)
            .await?
            .map(|document| self.decode(document))
            .transpose()
    }

    fn encode(&self, record: &T) -> Result<Document, StoreError> {
        match serde_json::to_value(record)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::Corrupt {
                collection: self.collection.as_str(),
                reason: "record does not serialize to a JSON object".to_string(),
            }),
        }
    }

    fn decode(&self, document: Document) -> Result<T, StoreError> {
        serde_json::from_value(Value::Object(document)).map_err(|e| StoreError::Corrupt {
            collection: self.collection.as_str(),
            reason: e.to_string(),
        })
    }
}
