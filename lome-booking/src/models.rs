use chrono::NaiveDate;
use lome_catalog::{DurationClass, Extra, ExtrasSelection, HeadsetModel};
use lome_shared::Masked;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::quote::PriceQuote;

/// What the customer has picked in the booking panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingSelection {
    pub model: HeadsetModel,
    pub start: NaiveDate,
    pub duration: DurationClass,
    pub insurance: bool,
    pub extras: ExtrasSelection,
}

/// Result of asking for a new start date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateChange {
    Accepted(NaiveDate),
    /// The candidate was in the past; the start moved to today instead
    Clamped(NaiveDate),
}

/// A single user input on the booking panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BookingEvent {
    SelectModel(HeadsetModel),
    SetStartDate(NaiveDate),
    SelectDuration(DurationClass),
    SetInsurance(bool),
    ToggleExtra(Extra),
}

impl BookingSelection {
    /// Defaults shown when the panel mounts
    pub fn new(today: NaiveDate) -> Self {
        Self {
            model: HeadsetModel::default(),
            start: today,
            duration: DurationClass::default(),
            insurance: false,
            extras: ExtrasSelection::none(),
        }
    }

    /// Accept `candidate` unless it is before `today`, in which case clamp to `today`
    pub fn set_start_date(&mut self, candidate: NaiveDate, today: NaiveDate) -> DateChange {
        if candidate < today {
            warn!(requested = %candidate, %today, "start date in the past, clamping to today");
            self.start = today;
            DateChange::Clamped(today)
        } else {
            debug!(start = %candidate, "start date changed");
            self.start = candidate;
            DateChange::Accepted(candidate)
        }
    }

    pub fn toggle_extra(&mut self, extra: Extra) {
        self.extras.toggle(extra);
        debug!(extras = ?self.extras, "extras changed");
    }

    /// Reducer for panel input
    pub fn apply(&mut self, event: BookingEvent, today: NaiveDate) {
        match event {
            BookingEvent::SelectModel(model) => {
                debug!(model = model.display_name(), "model changed");
                self.model = model;
            }
            BookingEvent::SetStartDate(date) => {
                self.set_start_date(date, today);
            }
            BookingEvent::SelectDuration(duration) => {
                debug!(duration = duration.label(), "duration changed");
                self.duration = duration;
            }
            BookingEvent::SetInsurance(insurance) => {
                debug!(insurance, "insurance changed");
                self.insurance = insurance;
            }
            BookingEvent::ToggleExtra(extra) => self.toggle_extra(extra),
        }
    }

    /// Fresh price quote; nothing is cached between calls
    pub fn quote(&self) -> PriceQuote {
        PriceQuote::derive(self)
    }
}

/// Fixed workflow status stamped on persisted documents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecordStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "nuevo")]
    New,
}

/// Reservation document written to `reservations`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub model: HeadsetModel,
    #[serde(rename = "modelTxt")]
    pub model_name: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: u32,
    #[serde(rename = "labelDays")]
    pub duration_label: &'static str,
    pub insurance: bool,
    pub extras: ExtrasSelection,
    #[serde(rename = "extrasText")]
    pub extras_text: String,
    pub base_price: i32,
    pub insurance_price: i32,
    pub extras_subtotal: i32,
    pub total: i32,
    pub status: RecordStatus,
    pub source: String,
}

impl BookingRecord {
    pub fn from_quote(quote: &PriceQuote, source: &str) -> Self {
        Self {
            model: quote.model,
            model_name: quote.model.display_name(),
            start: quote.start,
            end: quote.end,
            days: quote.duration.days(),
            duration_label: quote.duration.label(),
            insurance: quote.insurance,
            extras: quote.extras,
            extras_text: quote.extras.describe(),
            base_price: quote.base_price,
            insurance_price: quote.insurance_price,
            extras_subtotal: quote.extras_subtotal,
            total: quote.total,
            status: RecordStatus::Pending,
            source: source.to_string(),
        }
    }
}

/// Contact message document written to `contact_messages`
#[derive(Debug, Clone, Serialize)]
pub struct ContactRecord {
    pub name: String,
    pub email: Masked<String>,
    pub message: String,
    pub status: RecordStatus,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lome_shared::dates::parse_iso;

    fn d(stamp: &str) -> NaiveDate {
        parse_iso(stamp).unwrap()
    }

    #[test]
    fn test_defaults() {
        let selection = BookingSelection::new(d("2025-05-20"));
        assert_eq!(selection.model, HeadsetModel::Quest3);
        assert_eq!(selection.start, d("2025-05-20"));
        assert_eq!(selection.duration, DurationClass::OneDay);
        assert!(!selection.insurance);
        assert_eq!(selection.extras, ExtrasSelection::none());
    }

    #[test]
    fn test_past_start_is_clamped() {
        let today = d("2025-05-20");
        let mut selection = BookingSelection::new(today);

        assert_eq!(
            selection.set_start_date(d("2025-05-19"), today),
            DateChange::Clamped(today)
        );
        assert_eq!(selection.start, today);

        // Clamping again changes nothing
        selection.set_start_date(d("2024-01-01"), today);
        assert_eq!(selection.start, today);
    }

    #[test]
    fn test_today_and_future_accepted() {
        let today = d("2025-05-20");
        let mut selection = BookingSelection::new(today);

        assert_eq!(selection.set_start_date(today, today), DateChange::Accepted(today));
        selection.apply(BookingEvent::SetStartDate(d("2025-07-01")), today);
        assert_eq!(selection.start, d("2025-07-01"));
    }

    #[test]
    fn test_reducer_applies_each_event() {
        let today = d("2025-05-20");
        let mut selection = BookingSelection::new(today);

        selection.apply(BookingEvent::SelectModel(HeadsetModel::Quest3s), today);
        selection.apply(BookingEvent::SelectDuration(DurationClass::Weekend), today);
        selection.apply(BookingEvent::SetInsurance(true), today);
        selection.apply(BookingEvent::ToggleExtra(Extra::Charger), today);

        assert_eq!(selection.model, HeadsetModel::Quest3s);
        assert_eq!(selection.duration, DurationClass::Weekend);
        assert!(selection.insurance);
        assert!(selection.extras.charger);
    }

    #[test]
    fn test_event_wire_format() {
        let event: BookingEvent =
            serde_json::from_str(r#"{"type":"toggle_extra","value":"combo"}"#).unwrap();
        assert_eq!(event, BookingEvent::ToggleExtra(Extra::Combo));

        let event: BookingEvent =
            serde_json::from_str(r#"{"type":"select_duration","value":7}"#).unwrap();
        assert_eq!(event, BookingEvent::SelectDuration(DurationClass::Week));

        let event: BookingEvent =
            serde_json::from_str(r#"{"type":"set_start_date","value":"2025-06-01"}"#).unwrap();
        assert_eq!(event, BookingEvent::SetStartDate(d("2025-06-01")));
    }

    #[test]
    fn test_record_document_shape() {
        let today = d("2025-06-01");
        let mut selection = BookingSelection::new(today);
        selection.apply(BookingEvent::SelectDuration(DurationClass::Week), today);
        selection.apply(BookingEvent::ToggleExtra(Extra::Combo), today);

        let record = BookingRecord::from_quote(&selection.quote(), "lomevr-web");
        let doc = serde_json::to_value(&record).unwrap();

        assert_eq!(doc["model"], "q3");
        assert_eq!(doc["modelTxt"], "Quest 3");
        assert_eq!(doc["start"], "2025-06-01");
        assert_eq!(doc["end"], "2025-06-08");
        assert_eq!(doc["days"], 7);
        assert_eq!(doc["labelDays"], "Semana (7 días)");
        assert_eq!(doc["extras"]["combo"], true);
        assert_eq!(doc["extrasText"], "Combo (Cargador + auriculares)");
        assert_eq!(doc["extrasSubtotal"], 11000);
        assert_eq!(doc["total"], 321000);
        assert_eq!(doc["status"], "pendiente");
        assert_eq!(doc["source"], "lomevr-web");
    }
}
