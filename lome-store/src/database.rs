use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lome_core::{Collection, DocumentStore, StoreError, StoredDocument};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// Postgres-backed document store. Each collection is a tag on one `documents` table.
#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(connection_string: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed successfully.");
        Ok(())
    }
}

fn store_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(e.to_string())
        }
        other => StoreError::Rejected(other.to_string()),
    }
}

#[async_trait]
impl DocumentStore for DbClient {
    async fn insert(
        &self,
        collection: Collection,
        document: serde_json::Value,
    ) -> Result<StoredDocument, StoreError> {
        let id = Uuid::new_v4();

        let created_at: DateTime<Utc> = sqlx::query_scalar(
            "INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3) RETURNING created_at",
        )
        .bind(id)
        .bind(collection.as_str())
        .bind(&document)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        info!("Stored document {} in {}", id, collection);

        Ok(StoredDocument {
            id,
            collection,
            created_at,
        })
    }
}
