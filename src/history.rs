//! Dose history screen — filtering, grouping, CSV export.
//!
//! Computed per read over the store's dose collection. The CSV layout is a
//! compatibility surface (spreadsheets already import it), so the header,
//! quoting and localized status labels are fixed.

use serde::Serialize;

use crate::models::{DoseStatus, MedicationDose};

/// Suggested filename for the exported history.
pub const EXPORT_FILENAME: &str = "historico-medicamentos.csv";

const CSV_HEADER: &str = "Data,Hora,Medicamento,Dosagem,Status";

/// History filters. All present predicates must match.
#[derive(Debug, Clone, Default)]
pub struct DoseHistoryFilter {
    /// Exact `YYYY-MM-DD` match.
    pub date: Option<String>,
    pub medication_id: Option<String>,
    pub status: Option<DoseStatus>,
}

/// A day of history: the date plus its doses sorted by time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHistory {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub doses: Vec<MedicationDose>,
}

impl DayHistory {
    /// The date as the screen shows it (`DD/MM/YYYY`).
    pub fn display_date(&self) -> String {
        chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|_| self.date.clone())
    }
}

pub fn filter_doses<'a>(
    doses: &'a [MedicationDose],
    filter: &DoseHistoryFilter,
) -> Vec<&'a MedicationDose> {
    doses
        .iter()
        .filter(|d| filter.date.as_deref().map_or(true, |date| d.date == date))
        .filter(|d| {
            filter
                .medication_id
                .as_deref()
                .map_or(true, |id| d.medication_id == id)
        })
        .filter(|d| filter.status.map_or(true, |status| d.status == status))
        .collect()
}

/// Group filtered doses by date, newest date first, each day's doses sorted
/// by time.
pub fn group_by_date(doses: &[&MedicationDose]) -> Vec<DayHistory> {
    let mut days: Vec<DayHistory> = Vec::new();
    for dose in doses {
        match days.iter_mut().find(|day| day.date == dose.date) {
            Some(day) => day.doses.push((*dose).clone()),
            None => days.push(DayHistory {
                date: dose.date.clone(),
                doses: vec![(*dose).clone()],
            }),
        }
    }

    // ISO dates sort lexicographically
    days.sort_by(|a, b| b.date.cmp(&a.date));
    for day in &mut days {
        day.doses.sort_by(|a, b| a.time.cmp(&b.time));
    }
    days
}

/// Serialize doses to the export CSV: one row per dose, medication name and
/// dosage quoted, status as its localized label.
pub fn export_csv(doses: &[&MedicationDose]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for dose in doses {
        csv.push_str(&format!(
            "{},{},\"{}\",\"{}\",{}\n",
            dose.date,
            dose.time,
            dose.medication_name,
            dose.dosage,
            dose.status.label(),
        ));
    }
    csv
}
