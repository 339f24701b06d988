use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Logical collections the site writes to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Reservations,
    ContactMessages,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Reservations => "reservations",
            Collection::ContactMessages => "contact_messages",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acknowledgement of a single insert, carrying the store-assigned timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: Uuid,
    pub collection: Collection,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Document could not be encoded: {0}")]
    Encoding(String),

    #[error("Document store rejected the write: {0}")]
    Rejected(String),
}

/// Append-only document sink. Nothing in the site reads these documents back.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document atomically. The store stamps `createdAt` itself.
    async fn insert(
        &self,
        collection: Collection,
        document: serde_json::Value,
    ) -> Result<StoredDocument, StoreError>;
}
