pub mod models;
pub mod quote;
pub mod manager;
pub mod orchestrator;
pub mod contact;

#[cfg(test)]
pub(crate) mod testing;

pub use models::{BookingEvent, BookingRecord, BookingSelection, ContactRecord, DateChange, RecordStatus};
pub use quote::{MessagingLink, PriceQuote};
pub use manager::{BookingPanel, SubmissionStatus, SubmitOutcome};
pub use orchestrator::HandoffChannel;
pub use contact::{ContactDraft, ContactError, ContactForm, ContactOutcome, ContactStatus};

use std::sync::{Mutex, MutexGuard};

/// Lock a form's state, recovering the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
