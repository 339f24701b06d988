use chrono::NaiveDate;
use lome_core::Clock;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

use crate::lock;
use crate::models::{BookingEvent, BookingSelection};
use crate::orchestrator::HandoffChannel;
use crate::quote::PriceQuote;

/// Where the panel's current submission attempt stands
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Success,
    Failed,
}

/// What a call to [`BookingPanel::submit`] did
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Another submission was still in flight; nothing happened
    Ignored,
    /// The start date had slipped into the past; it was moved to today and nothing was sent
    DateCorrected { start: NaiveDate },
    /// The deep link was opened. `persisted` tells whether the reservation was saved,
    /// `reopened` whether the link had to be opened a second time.
    Submitted {
        deep_link: String,
        persisted: bool,
        reopened: bool,
    },
}

/// One booking panel: the customer's selection plus its submission state machine
/// (`Idle → Submitting → Success | Failed`).
pub struct BookingPanel {
    selection: Mutex<BookingSelection>,
    status: Mutex<SubmissionStatus>,
    clock: Arc<dyn Clock>,
}

impl BookingPanel {
    /// Mount a panel with default selections starting today
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let selection = BookingSelection::new(clock.today());
        Self {
            selection: Mutex::new(selection),
            status: Mutex::new(SubmissionStatus::Idle),
            clock,
        }
    }

    pub fn dispatch(&self, event: BookingEvent) -> BookingSelection {
        let mut selection = lock(&self.selection);
        selection.apply(event, self.clock.today());
        selection.clone()
    }

    pub fn selection(&self) -> BookingSelection {
        lock(&self.selection).clone()
    }

    pub fn quote(&self) -> PriceQuote {
        lock(&self.selection).quote()
    }

    pub fn status(&self) -> SubmissionStatus {
        *lock(&self.status)
    }

    /// Hand the booking off to the messaging app and save it.
    ///
    /// At most one submission runs at a time. A start date that fell into the past
    /// aborts the whole attempt after clamping. A failed save never fails the
    /// submission; the deep link is the confirmation channel.
    pub async fn submit(&self, channel: &HandoffChannel) -> SubmitOutcome {
        let quote = {
            let mut status = lock(&self.status);
            if *status == SubmissionStatus::Submitting {
                debug!("submission already in flight, ignoring");
                return SubmitOutcome::Ignored;
            }

            let mut selection = lock(&self.selection);
            let today = self.clock.today();
            if selection.start < today {
                warn!(start = %selection.start, %today, "start date in the past, correcting and not submitting");
                selection.start = today;
                return SubmitOutcome::DateCorrected { start: today };
            }

            *status = SubmissionStatus::Submitting;
            selection.quote()
        };

        let deep_link = channel.deep_link(&quote);
        let window = channel.open(&deep_link);

        let (persisted, reopened) = match channel.persist(&quote).await {
            Ok(stored) => {
                info!(id = %stored.id, "reservation saved");
                (true, false)
            }
            Err(e) => {
                error!("failed to save reservation: {}", e);
                (false, channel.compensate(&deep_link, window.as_deref()))
            }
        };

        *lock(&self.status) = if persisted {
            SubmissionStatus::Success
        } else {
            SubmissionStatus::Failed
        };

        SubmitOutcome::Submitted {
            deep_link,
            persisted,
            reopened,
        }
    }
}
