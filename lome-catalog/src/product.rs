use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Headsets available for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum HeadsetModel {
    #[default]
    #[serde(rename = "q3")]
    Quest3,
    #[serde(rename = "q3s")]
    Quest3s,
}

impl HeadsetModel {
    pub const ALL: [HeadsetModel; 2] = [HeadsetModel::Quest3, HeadsetModel::Quest3s];

    /// Short code used in forms and stored records
    pub fn code(&self) -> &'static str {
        match self {
            HeadsetModel::Quest3 => "q3",
            HeadsetModel::Quest3s => "q3s",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            HeadsetModel::Quest3 => "Quest 3",
            HeadsetModel::Quest3s => "Quest 3s",
        }
    }
}

impl FromStr for HeadsetModel {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "q3" => Ok(HeadsetModel::Quest3),
            "q3s" => Ok(HeadsetModel::Quest3s),
            other => Err(CatalogError::UnknownModel(other.to_string())),
        }
    }
}

/// Rental lengths that key the price table.
///
/// Serialized as the day count (1, 2 or 7); no other length exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DurationClass {
    #[default]
    OneDay,
    Weekend,
    Week,
}

impl DurationClass {
    pub const ALL: [DurationClass; 3] = [
        DurationClass::OneDay,
        DurationClass::Weekend,
        DurationClass::Week,
    ];

    pub fn days(&self) -> u32 {
        match self {
            DurationClass::OneDay => 1,
            DurationClass::Weekend => 2,
            DurationClass::Week => 7,
        }
    }

    pub fn from_days(days: u32) -> Result<Self, CatalogError> {
        match days {
            1 => Ok(DurationClass::OneDay),
            2 => Ok(DurationClass::Weekend),
            7 => Ok(DurationClass::Week),
            other => Err(CatalogError::UnsupportedDuration(other)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationClass::OneDay => "Por día",
            DurationClass::Weekend => "Fin de semana",
            DurationClass::Week => "Semana (7 días)",
        }
    }
}

impl Serialize for DurationClass {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.days())
    }
}

impl<'de> Deserialize<'de> for DurationClass {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let days = u32::deserialize(deserializer)?;
        DurationClass::from_days(days).map_err(serde::de::Error::custom)
    }
}

/// Optional add-ons
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Extra {
    Charger,
    Headphones,
    Combo,
}

impl Extra {
    pub fn price(&self) -> i32 {
        match self {
            Extra::Charger => 8000,
            Extra::Headphones => 6000,
            Extra::Combo => 11000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Extra::Charger => "Cargador inalámbrico (3h)",
            Extra::Headphones => "Auriculares premium",
            Extra::Combo => "Combo (Cargador + auriculares)",
        }
    }
}

impl FromStr for Extra {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "charger" => Ok(Extra::Charger),
            "headphones" => Ok(Extra::Headphones),
            "combo" => Ok(Extra::Combo),
            other => Err(CatalogError::UnknownExtra(other.to_string())),
        }
    }
}

/// Catalog lookup errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown headset model: {0}")]
    UnknownModel(String),

    #[error("Unsupported rental duration: {0} days")]
    UnsupportedDuration(u32),

    #[error("Unknown extra: {0}")]
    UnknownExtra(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_codes() {
        for model in HeadsetModel::ALL {
            assert_eq!(model.code().parse::<HeadsetModel>().unwrap(), model);
        }
        assert!("quest2".parse::<HeadsetModel>().is_err());
        assert_eq!(serde_json::to_string(&HeadsetModel::Quest3s).unwrap(), "\"q3s\"");
    }

    #[test]
    fn test_duration_closed_set() {
        assert_eq!(DurationClass::from_days(2).unwrap(), DurationClass::Weekend);
        assert_eq!(
            DurationClass::from_days(3),
            Err(CatalogError::UnsupportedDuration(3))
        );

        let week: DurationClass = serde_json::from_str("7").unwrap();
        assert_eq!(week, DurationClass::Week);
        assert!(serde_json::from_str::<DurationClass>("5").is_err());
    }
}
