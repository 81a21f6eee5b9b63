use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use super::{document_id, Collection, Document, DocumentStore, Filter, StoreError};
use crate::config::DatabaseConfig;

/// Document store backed by PostgreSQL JSONB tables, one per collection.
///
/// Filters are evaluated with JSONB containment (`body @> filter`), and
/// `seq` keeps insertion order for listings.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool without opening a connection yet
    pub fn connect_lazy(url: &str, config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(url)?;
        Ok(Self::new(pool))
    }

    fn into_document(collection: Collection, value: Value) -> Result<Document, StoreError> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Corrupt {
                collection: collection.as_str(),
                reason: format!("expected JSON object, found {}", other),
            }),
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<Document, StoreError> {
        let id = document_id(collection, &document)?;
        let sql = format!("INSERT INTO {} (id, body) VALUES ($1, $2) RETURNING body", collection);

        let body: Value = sqlx::query_scalar(&sql)
            .bind(id)
            .bind(Value::Object(document))
            .fetch_one(&self.pool)
            .await?;

        Self::into_document(collection, body)
    }

    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let sql = format!("SELECT body FROM {} WHERE body @> $1 ORDER BY seq", collection);

        let rows: Vec<Value> = sqlx::query_scalar(&sql)
            .bind(filter.to_value())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|body| Self::into_document(collection, body))
            .collect()
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>, StoreError> {
        let sql = format!("SELECT body FROM {} WHERE body @> $1 ORDER BY seq LIMIT 1", collection);

        let row: Option<Value> = sqlx::query_scalar(&sql)
            .bind(filter.to_value())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|body| Self::into_document(collection, body)).transpose()
    }

    async fn replace_one(
        &self,
        collection: Collection,
        filter: &Filter,
        document: Document,
    ) -> Result<Option<Document>, StoreError> {
        let sql = format!(
            "UPDATE {table} SET body = $2 \
             WHERE id = (SELECT id FROM {table} WHERE body @> $1 ORDER BY seq LIMIT 1) \
             RETURNING body",
            table = collection
        );

        let row: Option<Value> = sqlx::query_scalar(&sql)
            .bind(filter.to_value())
            .bind(Value::Object(document))
            .fetch_optional(&self.pool)
            .await?;

        row.map(|body| Self::into_document(collection, body)).transpose()
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>, StoreError> {
        let sql = format!(
            "DELETE FROM {table} \
             WHERE id = (SELECT id FROM {table} WHERE body @> $1 ORDER BY seq LIMIT 1) \
             RETURNING body",
            table = collection
        );

        let row: Option<Value> = sqlx::query_scalar(&sql)
            .bind(filter.to_value())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|body| Self::into_document(collection, body)).transpose()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn bootstrap(&self) -> Result<(), StoreError> {
        self.ping().await?;

        for collection in Collection::ALL {
            let create_table = format!(
                "CREATE TABLE IF NOT EXISTS {table} (\
                    id UUID PRIMARY KEY, \
                    seq BIGSERIAL NOT NULL, \
                    body JSONB NOT NULL, \
                    created_at TIMESTAMPTZ NOT NULL DEFAULT now()\
                 )",
                table = collection
            );
            sqlx::query(&create_table).execute(&self.pool).await?;

            let create_index = format!(
                "CREATE INDEX IF NOT EXISTS {table}_body_idx ON {table} USING GIN (body jsonb_path_ops)",
                table = collection
            );
            sqlx::query(&create_index).execute(&self.pool).await?;
        }

        info!("Document tables ready");
        Ok(())
    }
}
