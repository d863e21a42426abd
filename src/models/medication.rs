use serde::{Deserialize, Serialize};

/// A user-defined drug regimen: what to take, how much, and when.
///
/// Field names are camelCased on the wire so the persisted blobs keep the
/// layout the app has always written (`startDate`, `createdAt`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    /// Opaque unique id, assigned at creation, immutable.
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    /// Scheduled administration times, one `HH:MM` entry per daily dose.
    pub times: Vec<String>,
    /// `YYYY-MM-DD`.
    pub start_date: String,
    /// Optional `YYYY-MM-DD`; when present, strictly after `start_date`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub active: bool,
    /// RFC 3339 timestamp, set once at creation.
    pub created_at: String,
}

/// Input for creating a medication. Id, `createdAt` and the active flag are
/// assigned by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub times: Vec<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update for an existing medication. `None` fields are left as-is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationUpdate {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub times: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notes: Option<String>,
}

impl Medication {
    /// Merge a partial update into this record. Identity fields (`id`,
    /// `createdAt`) and the active flag are never touched here.
    pub fn apply(&mut self, update: MedicationUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(dosage) = update.dosage {
            self.dosage = dosage;
        }
        if let Some(frequency) = update.frequency {
            self.frequency = frequency;
        }
        if let Some(times) = update.times {
            self.times = times;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = Some(end_date);
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
    }
}
