use lome_core::{Collection, DocumentStore, HandoffLauncher, HandoffWindow, StoreError, StoredDocument};
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::BookingRecord;
use crate::quote::{MessagingLink, PriceQuote};

/// Collaborators a booking submission hands off to: the messaging deep link
/// (primary channel) and the document store (best effort).
#[derive(Clone)]
pub struct HandoffChannel {
    pub store: Arc<dyn DocumentStore>,
    pub launcher: Arc<dyn HandoffLauncher>,
    pub link: MessagingLink,
    /// Tag stamped on every record as `source`
    pub source: String,
}

impl HandoffChannel {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        launcher: Arc<dyn HandoffLauncher>,
        link: MessagingLink,
        source: impl Into<String>,
    ) -> Self {
        Self {
            store,
            launcher,
            link,
            source: source.into(),
        }
    }

    pub fn deep_link(&self, quote: &PriceQuote) -> String {
        self.link.deep_link(&quote.summary_message())
    }

    /// Open the messaging deep link
    pub fn open(&self, url: &str) -> Option<Box<dyn HandoffWindow>> {
        let window = self.launcher.open(url);
        if window.is_none() {
            warn!("messaging window could not be opened");
        }
        window
    }

    /// Write the reservation document
    pub async fn persist(&self, quote: &PriceQuote) -> Result<StoredDocument, StoreError> {
        let record = BookingRecord::from_quote(quote, &self.source);
        let document = serde_json::to_value(&record)
            .map_err(|e| StoreError::Encoding(e.to_string()))?;

        info!(total = record.total, model = record.model_name, "saving reservation");
        self.store.insert(Collection::Reservations, document).await
    }

    /// Re-open the deep link when the first window never made it to the customer.
    /// Returns whether a second window was requested.
    pub fn compensate(&self, url: &str, window: Option<&dyn HandoffWindow>) -> bool {
        let missing = window.map_or(true, |w| w.is_closed());
        if missing {
            info!("re-opening messaging window after failed save");
            self.launcher.open(url);
        }
        missing
    }
}
