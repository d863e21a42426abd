use serde::{Deserialize, Serialize};

use super::enums::DoseStatus;

/// A single scheduled administration of a medication on a given date.
///
/// `medication_name` and `dosage` are denormalized copies of the owning
/// medication's fields, kept in sync by the store when the medication is
/// updated. `medication_id` is a lookup reference, not ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationDose {
    pub id: String,
    pub medication_id: String,
    pub medication_name: String,
    pub dosage: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    pub status: DoseStatus,
}
