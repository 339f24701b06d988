use chrono::NaiveDate;
use lome_catalog::{rate_for, DurationClass, ExtrasSelection, HeadsetModel};
use lome_shared::dates::{add_days, format_dmy};
use lome_shared::format_ars;
use serde::{Deserialize, Serialize};

use crate::models::BookingSelection;

/// Price breakdown derived from a selection
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PriceQuote {
    pub model: HeadsetModel,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration: DurationClass,
    pub base_price: i32,
    pub insurance_price: i32,
    pub insurance: bool,
    pub extras: ExtrasSelection,
    pub extras_subtotal: i32,
    pub total: i32,
}

impl PriceQuote {
    pub fn derive(selection: &BookingSelection) -> Self {
        let rate = rate_for(selection.model, selection.duration);
        let extras_subtotal = selection.extras.subtotal();
        let insured = if selection.insurance { rate.insurance } else { 0 };

        Self {
            model: selection.model,
            start: selection.start,
            end: add_days(selection.start, selection.duration.days()),
            duration: selection.duration,
            base_price: rate.base,
            insurance_price: rate.insurance,
            insurance: selection.insurance,
            extras: selection.extras,
            extras_subtotal,
            total: rate.base + insured + extras_subtotal,
        }
    }

    /// Pre-filled message the operator receives through the messaging app
    pub fn summary_message(&self) -> String {
        format!(
            "Hola LOME VR 👋 Quiero reservar {model}.\n\
             Período: {start} → {end} ({label})\n\
             Seguro: {insurance}\n\
             Extras: {extras} (+${subtotal})\n\
             Total estimado: ${total}",
            model = self.model.display_name(),
            start = format_dmy(self.start),
            end = format_dmy(self.end),
            label = self.duration.label(),
            insurance = if self.insurance { "Sí" } else { "No" },
            extras = self.extras.describe(),
            subtotal = format_ars(self.extras_subtotal),
            total = format_ars(self.total),
        )
    }

    /// Short line shown under the total in the panel
    pub fn booking_line(&self) -> String {
        let mut line = format!(
            "Del {} al {} — {}",
            format_dmy(self.start),
            format_dmy(self.end),
            self.duration.label()
        );
        if self.extras_subtotal > 0 {
            line.push_str(&format!(" — Extras: {}", self.extras.describe()));
        }
        line
    }
}

/// Where the messaging deep link points
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessagingLink {
    pub base_url: String,
    pub phone: String,
}

impl MessagingLink {
    pub fn new(base_url: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            phone: phone.into(),
        }
    }

    /// `{base_url}/{phone}?text={percent-encoded text}`
    pub fn deep_link(&self, text: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url.trim_end_matches('/'),
            self.phone,
            urlencoding::encode(text)
        )
    }
}
