use lome_core::{Collection, DocumentStore, StoreError};
use lome_shared::Masked;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{error, info, warn};

use crate::lock;
use crate::models::{ContactRecord, RecordStatus};

pub const CONFIRMATION: &str = "¡Mensaje enviado! Te respondemos a la brevedad.";

/// Fields of the contact form as typed
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    /// Hidden field real visitors never see
    #[serde(default)]
    pub company: String,
}

/// Errors shown under the contact form
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactError {
    #[error("Error de validación.")]
    Validation,

    #[error("Completá todos los campos.")]
    MissingFields,

    #[error("Hubo un error enviando el mensaje. Probá de nuevo.")]
    Delivery,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "state", content = "error", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactStatus {
    Idle,
    Sending,
    Sent,
    Error(ContactError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// A send was already in progress
    Ignored,
    Sent,
    Rejected(ContactError),
}

/// Contact form with its `Idle → Sending → Sent | Error` state machine
#[derive(Debug)]
pub struct ContactForm {
    draft: Mutex<ContactDraft>,
    status: Mutex<ContactStatus>,
}

struct ValidMessage {
    name: String,
    email: String,
    message: String,
}

fn validate(draft: &ContactDraft) -> Result<ValidMessage, ContactError> {
    if !draft.company.is_empty() {
        warn!("honeypot field filled, likely a bot");
        return Err(ContactError::Validation);
    }

    let name = draft.name.trim();
    let email = draft.email.trim();
    let message = draft.message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        warn!(
            has_name = !name.is_empty(),
            has_email = !email.is_empty(),
            message_len = message.len(),
            "contact form incomplete"
        );
        return Err(ContactError::MissingFields);
    }

    Ok(ValidMessage {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

impl ContactForm {
    pub fn new() -> Self {
        Self::with_draft(ContactDraft::default())
    }

    pub fn with_draft(draft: ContactDraft) -> Self {
        Self {
            draft: Mutex::new(draft),
            status: Mutex::new(ContactStatus::Idle),
        }
    }

    pub fn draft(&self) -> ContactDraft {
        lock(&self.draft).clone()
    }

    pub fn edit(&self, draft: ContactDraft) {
        *lock(&self.draft) = draft;
    }

    pub fn status(&self) -> ContactStatus {
        *lock(&self.status)
    }

    /// Message to show under the form, if any
    pub fn feedback(&self) -> Option<String> {
        match self.status() {
            ContactStatus::Sent => Some(CONFIRMATION.to_string()),
            ContactStatus::Error(e) => Some(e.to_string()),
            ContactStatus::Idle | ContactStatus::Sending => None,
        }
    }

    /// Validate and send the current draft.
    ///
    /// The honeypot is checked before anything else and rejects with the same
    /// generic error family as a missing field; neither reaches the store.
    pub async fn submit(&self, store: &dyn DocumentStore, source: &str) -> ContactOutcome {
        let valid = {
            let mut status = lock(&self.status);
            if *status == ContactStatus::Sending {
                return ContactOutcome::Ignored;
            }

            match validate(&lock(&self.draft)) {
                Ok(valid) => {
                    *status = ContactStatus::Sending;
                    valid
                }
                Err(e) => {
                    *status = ContactStatus::Error(e);
                    return ContactOutcome::Rejected(e);
                }
            }
        };

        let record = ContactRecord {
            name: valid.name,
            email: Masked(valid.email),
            message: valid.message,
            status: RecordStatus::New,
            source: source.to_string(),
        };
        info!(name = %record.name, email = %record.email, "sending contact message");

        let result = match serde_json::to_value(&record) {
            Ok(document) => store.insert(Collection::ContactMessages, document).await,
            Err(e) => Err(StoreError::Encoding(e.to_string())),
        };

        match result {
            Ok(stored) => {
                info!(id = %stored.id, "contact message saved");
                *lock(&self.draft) = ContactDraft::default();
                *lock(&self.status) = ContactStatus::Sent;
                ContactOutcome::Sent
            }
            Err(e) => {
                error!("failed to save contact message: {}", e);
                *lock(&self.status) = ContactStatus::Error(ContactError::Delivery);
                ContactOutcome::Rejected(ContactError::Delivery)
            }
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{GatedStore, MemoryStore};
    use std::sync::Arc;

    fn filled() -> ContactDraft {
        ContactDraft {
            name: "  Ana ".to_string(),
            email: "ana@example.com".to_string(),
            message: "¿Tienen disponibilidad el sábado?".to_string(),
            company: String::new(),
        }
    }

    #[tokio::test]
    async fn test_valid_message_is_saved_once_and_form_resets() {
        let store = MemoryStore::new();
        let form = ContactForm::with_draft(filled());

        assert_eq!(form.submit(&store, "lomevr-web").await, ContactOutcome::Sent);

        let docs = store.documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].0, Collection::ContactMessages);
        assert_eq!(docs[0].1["name"], "Ana");
        assert_eq!(docs[0].1["email"], "ana@example.com");
        assert_eq!(docs[0].1["status"], "nuevo");
        assert_eq!(docs[0].1["source"], "lomevr-web");

        assert_eq!(form.draft(), ContactDraft::default());
        assert_eq!(form.status(), ContactStatus::Sent);
        assert_eq!(form.feedback().as_deref(), Some(CONFIRMATION));
    }

    #[tokio::test]
    async fn test_resubmit_while_sending_is_ignored() {
        let store = Arc::new(GatedStore::new());
        let form = Arc::new(ContactForm::with_draft(filled()));

        let first = {
            let store = store.clone();
            let form = form.clone();
            tokio::spawn(async move { form.submit(store.as_ref(), "lomevr-web").await })
        };

        store.entered.notified().await;
        assert_eq!(form.status(), ContactStatus::Sending);

        assert_eq!(form.submit(store.as_ref(), "lomevr-web").await, ContactOutcome::Ignored);
        assert_eq!(form.status(), ContactStatus::Sending);

        store.release.notify_one();
        assert_eq!(first.await.unwrap(), ContactOutcome::Sent);
        assert_eq!(store.calls(), 1);
        assert_eq!(form.status(), ContactStatus::Sent);
    }

    #[tokio::test]
    async fn test_honeypot_never_writes() {
        let store = MemoryStore::new();
        let mut draft = filled();
        draft.company = "ACME".to_string();
        let form = ContactForm::with_draft(draft);

        assert_eq!(
            form.submit(&store, "lomevr-web").await,
            ContactOutcome::Rejected(ContactError::Validation)
        );
        assert!(store.documents().is_empty());
        assert_eq!(form.feedback().as_deref(), Some("Error de validación."));
    }

    #[tokio::test]
    async fn test_honeypot_checked_before_missing_fields() {
        let store = MemoryStore::new();
        let form = ContactForm::with_draft(ContactDraft {
            company: "x".to_string(),
            ..ContactDraft::default()
        });

        assert_eq!(
            form.submit(&store, "lomevr-web").await,
            ContactOutcome::Rejected(ContactError::Validation)
        );
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let store = MemoryStore::new();
        let mut draft = filled();
        draft.message = "   \n ".to_string();
        let form = ContactForm::with_draft(draft.clone());

        assert_eq!(
            form.submit(&store, "lomevr-web").await,
            ContactOutcome::Rejected(ContactError::MissingFields)
        );
        assert!(store.documents().is_empty());
        // Draft untouched so the visitor can fix it
        assert_eq!(form.draft(), draft);
    }

    #[tokio::test]
    async fn test_store_failure_allows_retry() {
        let failing = MemoryStore::failing();
        let form = ContactForm::with_draft(filled());

        assert_eq!(
            form.submit(&failing, "lomevr-web").await,
            ContactOutcome::Rejected(ContactError::Delivery)
        );
        assert_eq!(
            form.feedback().as_deref(),
            Some("Hubo un error enviando el mensaje. Probá de nuevo.")
        );
        assert_eq!(form.draft(), filled());

        let store = MemoryStore::new();
        assert_eq!(form.submit(&store, "lomevr-web").await, ContactOutcome::Sent);
        assert_eq!(store.documents().len(), 1);
    }
}
