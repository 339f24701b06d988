use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lome_core::{Collection, DocumentStore, StoreError, StoredDocument};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    pub id: Uuid,
    pub collection: Collection,
    pub created_at: DateTime<Utc>,
    pub body: serde_json::Value,
}

/// Process-local document store, used when no database is configured and in tests.
/// Documents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<Vec<MemoryDocument>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of one collection, oldest first
    pub async fn documents(&self, collection: Collection) -> Vec<MemoryDocument> {
        self.documents
            .read()
            .await
            .iter()
            .filter(|d| d.collection == collection)
            .cloned()
            .collect()
    }

    pub async fn count(&self, collection: Collection) -> usize {
        self.documents
            .read()
            .await
            .iter()
            .filter(|d| d.collection == collection)
            .count()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(
        &self,
        collection: Collection,
        document: serde_json::Value,
    ) -> Result<StoredDocument, StoreError> {
        if !document.is_object() {
            return Err(StoreError::Rejected("document must be a JSON object".to_string()));
        }

        let stored = MemoryDocument {
            id: Uuid::new_v4(),
            collection,
            created_at: Utc::now(),
            body: document,
        };
        debug!("Stored document {} in {}", stored.id, collection);

        let ack = StoredDocument {
            id: stored.id,
            collection,
            created_at: stored.created_at,
        };
        self.documents.write().await.push(stored);
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let store = InMemoryDocumentStore::new();
        let before = Utc::now();

        let ack = store
            .insert(Collection::Reservations, json!({"total": 65000}))
            .await
            .unwrap();

        assert_eq!(ack.collection, Collection::Reservations);
        assert!(ack.created_at >= before);

        let docs = store.documents(Collection::Reservations).await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, ack.id);
        assert_eq!(docs[0].body["total"], 65000);
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let store = InMemoryDocumentStore::new();
        store.insert(Collection::Reservations, json!({})).await.unwrap();
        store.insert(Collection::ContactMessages, json!({})).await.unwrap();
        store.insert(Collection::ContactMessages, json!({})).await.unwrap();

        assert_eq!(store.count(Collection::Reservations).await, 1);
        assert_eq!(store.count(Collection::ContactMessages).await, 2);
    }

    #[tokio::test]
    async fn test_rejects_non_object() {
        let store = InMemoryDocumentStore::new();
        let result = store.insert(Collection::Reservations, json!([1, 2])).await;
        assert!(matches!(result, Err(StoreError::Rejected(_))));
        assert_eq!(store.count(Collection::Reservations).await, 0);
    }
}
