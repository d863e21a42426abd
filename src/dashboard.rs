//! Dashboard screen — derived data.
//!
//! Everything here is computed from the store's collections on every call,
//! never cached: today's schedule split by status, the adherence summary,
//! and the 7-day week grid.

use chrono::{Duration, Local};
use serde::Serialize;

use crate::models::{DoseStatus, Medication, MedicationDose};
use crate::seed;

/// Header numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub active_medications: usize,
    pub taken_today: usize,
    /// Doses scheduled for today that are still relevant (taken + pending).
    pub scheduled_today: usize,
}

impl DashboardSummary {
    pub fn compute(medications: &[Medication], doses: &[MedicationDose]) -> Self {
        let today = seed::today();
        let taken = taken_doses_on(doses, &today).len();
        let pending = pending_doses_on(doses, &today).len();
        Self {
            active_medications: active_medications(medications).len(),
            taken_today: taken,
            scheduled_today: taken + pending,
        }
    }
}

/// One column of the week grid: a date and everything scheduled on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub doses: Vec<MedicationDose>,
}

pub fn active_medications(medications: &[Medication]) -> Vec<&Medication> {
    medications.iter().filter(|m| m.active).collect()
}

/// Today's still-pending doses, earliest first.
pub fn upcoming_doses(doses: &[MedicationDose]) -> Vec<&MedicationDose> {
    pending_doses_on(doses, &seed::today())
}

pub fn pending_doses_on<'a>(doses: &'a [MedicationDose], date: &str) -> Vec<&'a MedicationDose> {
    let mut pending: Vec<&MedicationDose> = doses
        .iter()
        .filter(|d| d.date == date && d.status == DoseStatus::Pending)
        .collect();
    pending.sort_by(|a, b| a.time.cmp(&b.time));
    pending
}

pub fn taken_doses_on<'a>(doses: &'a [MedicationDose], date: &str) -> Vec<&'a MedicationDose> {
    doses
        .iter()
        .filter(|d| d.date == date && d.status == DoseStatus::Taken)
        .collect()
}

/// The next 7 days starting today, with each day's doses sorted by time.
/// Days without doses still appear, with an empty list.
pub fn week_schedule(doses: &[MedicationDose]) -> Vec<DaySchedule> {
    let start = Local::now().date_naive();
    (0..7)
        .map(|offset| {
            let date = (start + Duration::days(offset)).format("%Y-%m-%d").to_string();
            let mut day_doses: Vec<MedicationDose> = doses
                .iter()
                .filter(|d| d.date == date)
                .cloned()
                .collect();
            day_doses.sort_by(|a, b| a.time.cmp(&b.time));
            DaySchedule {
                date,
                doses: day_doses,
            }
        })
        .collect()
}
