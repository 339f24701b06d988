use serde::{Deserialize, Serialize};
use crate::product::{DurationClass, Extra, HeadsetModel};

/// Base rental price and insurance price for one (model, duration) pair, in pesos
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rate {
    pub base: i32,
    pub insurance: i32,
}

/// Fixed rental price table
pub fn rate_for(model: HeadsetModel, duration: DurationClass) -> Rate {
    let (base, insurance) = match (model, duration) {
        (HeadsetModel::Quest3, DurationClass::OneDay) => (65000, 4000),
        (HeadsetModel::Quest3, DurationClass::Weekend) => (100000, 8000),
        (HeadsetModel::Quest3, DurationClass::Week) => (310000, 20000),
        (HeadsetModel::Quest3s, DurationClass::OneDay) => (55000, 3000),
        (HeadsetModel::Quest3s, DurationClass::Weekend) => (90000, 6000),
        (HeadsetModel::Quest3s, DurationClass::Week) => (300000, 15000),
    };

    Rate { base, insurance }
}

/// Selected add-ons.
///
/// The combo never coexists with an individual charger or headphones:
/// switching one side on switches the other side off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExtrasSelection {
    pub charger: bool,
    pub headphones: bool,
    pub combo: bool,
}

impl ExtrasSelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, extra: Extra) -> bool {
        match extra {
            Extra::Charger => self.charger,
            Extra::Headphones => self.headphones,
            Extra::Combo => self.combo,
        }
    }

    /// Flip one extra, clearing whatever it is exclusive with when turning it on
    pub fn toggle(&mut self, extra: Extra) {
        let turning_on = !self.is_selected(extra);

        match extra {
            Extra::Charger => self.charger = turning_on,
            Extra::Headphones => self.headphones = turning_on,
            Extra::Combo => self.combo = turning_on,
        }

        if turning_on {
            match extra {
                Extra::Combo => {
                    self.charger = false;
                    self.headphones = false;
                }
                Extra::Charger | Extra::Headphones => self.combo = false,
            }
        }
    }

    /// Selected extras in display order
    pub fn selected(&self) -> Vec<Extra> {
        if self.combo {
            return vec![Extra::Combo];
        }

        [Extra::Charger, Extra::Headphones]
            .into_iter()
            .filter(|e| self.is_selected(*e))
            .collect()
    }

    /// Combo price when the combo is on, otherwise the sum of the individual extras
    pub fn subtotal(&self) -> i32 {
        self.selected().iter().map(Extra::price).sum()
    }

    /// Comma-separated labels, or `Ninguno`
    pub fn describe(&self) -> String {
        let labels: Vec<&str> = self.selected().iter().map(Extra::label).collect();
        if labels.is_empty() {
            "Ninguno".to_string()
        } else {
            labels.join(", ")
        }
    }
}
