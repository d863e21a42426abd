//! Medication list screen — search, status filter, ordering.

use crate::models::Medication;

/// Filter parameters for the medication list.
#[derive(Debug, Clone, Default)]
pub struct MedicationListFilter {
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
    /// `Some(true)` for active only, `Some(false)` for inactive only.
    pub active: Option<bool>,
}

/// Apply the list filter and the screen's fixed ordering:
/// active medications first, then alphabetical by name.
pub fn filter_medications<'a>(
    medications: &'a [Medication],
    filter: &MedicationListFilter,
) -> Vec<&'a Medication> {
    let needle = filter
        .search
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();

    let mut matched: Vec<&Medication> = medications
        .iter()
        .filter(|m| m.name.to_lowercase().contains(&needle))
        .filter(|m| filter.active.map_or(true, |active| m.active == active))
        .collect();

    matched.sort_by(|a, b| b.active.cmp(&a.active).then_with(|| a.name.cmp(&b.name)));
    matched
}
