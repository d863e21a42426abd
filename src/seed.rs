//! First-run demo dataset.
//!
//! When the blob store has no persisted collections, the medication store
//! seeds these fixtures so a fresh install has something to show: three
//! medications and eight doses spanning today and yesterday.

use chrono::{Duration, Local};

use crate::models::{DoseStatus, Medication, MedicationDose};

/// Today as a `YYYY-MM-DD` string, in local time.
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

fn yesterday() -> String {
    (Local::now().date_naive() - Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
}

pub fn seed_medications() -> Vec<Medication> {
    vec![
        Medication {
            id: "1".into(),
            name: "Paracetamol".into(),
            dosage: "1 comprimido".into(),
            frequency: "3x ao dia".into(),
            times: vec!["08:00".into(), "14:00".into(), "20:00".into()],
            start_date: "2025-04-01".into(),
            end_date: None,
            notes: Some("Tomar após as refeições".into()),
            active: true,
            created_at: "2025-04-01T10:00:00Z".into(),
        },
        Medication {
            id: "2".into(),
            name: "Vitamina C".into(),
            dosage: "1 comprimido".into(),
            frequency: "1x ao dia".into(),
            times: vec!["12:30".into()],
            start_date: "2025-04-01".into(),
            end_date: None,
            notes: None,
            active: true,
            created_at: "2025-04-01T10:00:00Z".into(),
        },
        Medication {
            id: "3".into(),
            name: "Omeprazol".into(),
            dosage: "1 cápsula".into(),
            frequency: "1x ao dia".into(),
            times: vec!["19:00".into()],
            start_date: "2025-04-01".into(),
            end_date: None,
            notes: None,
            active: true,
            created_at: "2025-04-01T10:00:00Z".into(),
        },
    ]
}

pub fn seed_doses() -> Vec<MedicationDose> {
    let today = today();
    let yesterday = yesterday();

    let dose = |id: &str, med: &str, name: &str, dosage: &str, date: &str, time: &str, status| {
        MedicationDose {
            id: id.into(),
            medication_id: med.into(),
            medication_name: name.into(),
            dosage: dosage.into(),
            date: date.into(),
            time: time.into(),
            status,
        }
    };

    vec![
        dose("1", "1", "Paracetamol", "1 comprimido", &today, "08:00", DoseStatus::Taken),
        dose("2", "1", "Paracetamol", "1 comprimido", &today, "14:00", DoseStatus::Pending),
        dose("3", "1", "Paracetamol", "1 comprimido", &today, "20:00", DoseStatus::Pending),
        dose("4", "2", "Vitamina C", "1 comprimido", &today, "12:30", DoseStatus::Pending),
        dose("5", "3", "Omeprazol", "1 cápsula", &today, "19:00", DoseStatus::Pending),
        dose("6", "1", "Paracetamol", "1 comprimido", &yesterday, "08:00", DoseStatus::Taken),
        dose("7", "1", "Paracetamol", "1 comprimido", &yesterday, "14:00", DoseStatus::Taken),
        dose("8", "1", "Paracetamol", "1 comprimido", &yesterday, "20:00", DoseStatus::Taken),
    ]
}
