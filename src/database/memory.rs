use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{document_id, Collection, Document, DocumentStore, Filter, StoreError};

/// Process-local document store.
///
/// Each collection is an insertion-ordered vector, so `find` returns
/// documents in the order they were created.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<Collection, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn len(&self, collection: Collection) -> usize {
        let collections = self.collections.read().await;
        collections.get(&collection).map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<Document, StoreError> {
        let id = document_id(collection, &document)?;

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();
        if documents.iter().any(|d| document_id(collection, d).ok() == Some(id)) {
            return Err(StoreError::Corrupt {
                collection: collection.as_str(),
                reason: format!("duplicate id {}", id),
            });
        }
        documents.push(document.clone());

        Ok(document)
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|documents| documents.iter().filter(|d| filter.matches(d)).cloned().collect::<Vec<_>>())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|documents| documents.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn replace_one(
        &self,
        collection: Collection,
        filter: &Filter,
        document: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(slot) = collections
            .get_mut(&collection)
            .and_then(|documents| documents.iter_mut().find(|d| filter.matches(d)))
        else {
            return Ok(None);
        };

        *slot = document.clone();
        Ok(Some(document))
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(None);
        };

        Ok(documents
            .iter()
            .position(|d| filter.matches(d))
            .map(|index| documents.remove(index)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use uuid::Uuid;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn wishlist(email: &str) -> (Uuid, Document) {
        let id = Uuid::new_v4();
        (id, doc(json!({ "id": id.to_string(), "email": email })))
    }

    #[tokio::test]
    async fn find_preserves_insertion_order() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for name in ["a", "b", "c"] {
            let id = Uuid::new_v4();
            ids.push(id.to_string());
            store
                .insert(Collection::Products, doc(json!({ "id": id.to_string(), "name": name })))
                .await
                .unwrap();
        }

        let found = store.find(Collection::Products, &Filter::all()).await.unwrap();
        let found_ids: Vec<String> = found.iter().map(|d| d["id"].as_str().unwrap().to_string()).collect();
        assert_eq!(found_ids, ids);
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = MemoryStore::new();
        let (_, entry) = wishlist("a@example.com");
        store.insert(Collection::Wishlists, entry).await.unwrap();

        assert_eq!(store.len(Collection::Wishlists).await, 1);
        assert!(store.find(Collection::Products, &Filter::all()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let store = MemoryStore::new();
        let (_, entry) = wishlist("a@example.com");
        store.insert(Collection::Wishlists, entry.clone()).await.unwrap();

        assert!(store.insert(Collection::Wishlists, entry).await.is_err());
        assert_eq!(store.len(Collection::Wishlists).await, 1);
    }

    #[tokio::test]
    async fn delete_one_respects_every_condition() {
        let store = MemoryStore::new();
        let (id, entry) = wishlist("owner@example.com");
        store.insert(Collection::Wishlists, entry).await.unwrap();

        let wrong_owner = Filter::by_id(id).eq("email", "other@example.com");
        assert!(store.delete_one(Collection::Wishlists, &wrong_owner).await.unwrap().is_none());
        assert_eq!(store.len(Collection::Wishlists).await, 1);

        let owner = Filter::by_id(id).eq("email", "owner@example.com");
        let removed = store.delete_one(Collection::Wishlists, &owner).await.unwrap();
        assert!(removed.is_some());
        assert_eq!(store.len(Collection::Wishlists).await, 0);
    }

    #[tokio::test]
    async fn replace_one_returns_none_when_missing() {
        let store = MemoryStore::new();
        let (id, entry) = wishlist("a@example.com");

        let replaced = store
            .replace_one(Collection::Wishlists, &Filter::by_id(id), entry)
            .await
            .unwrap();
        assert!(replaced.is_none());
        assert_eq!(store.len(Collection::Wishlists).await, 0);
    }
}
