use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a persisted enum string doesn't match any known variant.
#[derive(Debug, Error)]
#[error("Invalid value for {field}: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Tracked state of a single scheduled dose.
///
/// Serialized lowercase to match the persisted blob layout
/// (`"pending"` / `"taken"` / `"missed"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoseStatus {
    Pending,
    Taken,
    Missed,
}

impl DoseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Taken => "taken",
            Self::Missed => "missed",
        }
    }

    /// Display label shown to the user (and written to the CSV export).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Taken => "Tomado",
            Self::Missed => "Não tomado",
        }
    }
}

impl std::str::FromStr for DoseStatus {
    type Err = InvalidEnum;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "taken" => Ok(Self::Taken),
            "missed" => Ok(Self::Missed),
            _ => Err(InvalidEnum {
                field: "DoseStatus".into(),
                value: s.into(),
            }),
        }
    }
}

/// Subscription plan on the user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Premium,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
        }
    }
}
