use async_trait::async_trait;
use chrono::Utc;
use lome_core::{Collection, DocumentStore, HandoffLauncher, HandoffWindow, StoreError, StoredDocument};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;
use uuid::Uuid;

fn stored(collection: Collection) -> StoredDocument {
    StoredDocument {
        id: Uuid::new_v4(),
        collection,
        created_at: Utc::now(),
    }
}

pub struct MemoryStore {
    docs: Mutex<Vec<(Collection, serde_json::Value)>>,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { docs: Mutex::new(Vec::new()), fail: false }
    }

    pub fn failing() -> Self {
        Self { docs: Mutex::new(Vec::new()), fail: true }
    }

    pub fn documents(&self) -> Vec<(Collection, serde_json::Value)> {
        self.docs.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(
        &self,
        collection: Collection,
        document: serde_json::Value,
    ) -> Result<StoredDocument, StoreError> {
        if self.fail {
            return Err(StoreError::Unavailable("offline".to_string()));
        }
        self.docs.lock().unwrap().push((collection, document));
        Ok(stored(collection))
    }
}

/// Holds every insert until `release` is notified
pub struct GatedStore {
    pub entered: Notify,
    pub release: Notify,
    calls: AtomicUsize,
}

impl GatedStore {
    pub fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for GatedStore {
    async fn insert(
        &self,
        collection: Collection,
        _document: serde_json::Value,
    ) -> Result<StoredDocument, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(stored(collection))
    }
}

#[derive(Clone, Copy)]
enum LaunchMode {
    Open,
    BlockFirst,
    CloseImmediately,
}

struct FakeWindow {
    closed: bool,
}

impl HandoffWindow for FakeWindow {
    fn is_closed(&self) -> bool {
        self.closed
    }
}

pub struct RecordingLauncher {
    opened: Mutex<Vec<String>>,
    mode: LaunchMode,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::with_mode(LaunchMode::Open)
    }

    /// Popup blocker swallows the first window
    pub fn blocking_first() -> Self {
        Self::with_mode(LaunchMode::BlockFirst)
    }

    /// Customer closes the window right away
    pub fn closing() -> Self {
        Self::with_mode(LaunchMode::CloseImmediately)
    }

    fn with_mode(mode: LaunchMode) -> Self {
        Self { opened: Mutex::new(Vec::new()), mode }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl HandoffLauncher for RecordingLauncher {
    fn open(&self, url: &str) -> Option<Box<dyn HandoffWindow>> {
        let mut opened = self.opened.lock().unwrap();
        opened.push(url.to_string());

        match self.mode {
            LaunchMode::BlockFirst if opened.len() == 1 => None,
            LaunchMode::CloseImmediately => Some(Box::new(FakeWindow { closed: true })),
            _ => Some(Box::new(FakeWindow { closed: false })),
        }
    }
}
