//! Medication & dose store — the single source of truth.
//!
//! Owns the medication and dose collections, funnels every mutation through
//! a fixed operation set, and persists both collections to the blob store at
//! the end of each mutating operation. Consumers read the collections and
//! derive their screens from them (`dashboard`, `medication_list`,
//! `history`); nothing outside this type mutates state.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{
    DoseStatus, Medication, MedicationDose, MedicationUpdate, NewMedication,
};
use crate::notify::{Notification, Notifier};
use crate::seed;
use crate::storage::{BlobStore, StorageError, DOSES_KEY, MEDICATIONS_KEY};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Required field missing: {field}")]
    MissingField { field: &'static str },

    #[error("Medication not found: {id}")]
    MedicationNotFound { id: String },

    #[error("Dose not found: {id}")]
    DoseNotFound { id: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Single source of truth for medications and their dose records.
///
/// Operations on an unknown id fail with an explicit NotFound error rather
/// than silently no-opping; nothing is mutated or persisted in that case.
pub struct MedicationStore {
    medications: Vec<Medication>,
    doses: Vec<MedicationDose>,
    blobs: Box<dyn BlobStore>,
    notifier: Box<dyn Notifier>,
}

impl MedicationStore {
    /// Load persisted collections, seeding the demo dataset on first run.
    ///
    /// Corrupt or schema-mismatched blobs are logged and reset to the seed
    /// dataset: the data is single-user and non-critical, so failing open
    /// beats refusing to start.
    pub fn load(
        blobs: Box<dyn BlobStore>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self, StoreError> {
        let medications = match read_collection(&*blobs, MEDICATIONS_KEY)? {
            Some(medications) => medications,
            None => {
                let medications = seed::seed_medications();
                write_collection(&*blobs, MEDICATIONS_KEY, &medications)?;
                tracing::info!(count = medications.len(), "Seeded demo medications");
                medications
            }
        };

        let doses = match read_collection(&*blobs, DOSES_KEY)? {
            Some(doses) => doses,
            None => {
                let doses = seed::seed_doses();
                write_collection(&*blobs, DOSES_KEY, &doses)?;
                tracing::info!(count = doses.len(), "Seeded demo doses");
                doses
            }
        };

        Ok(Self {
            medications,
            doses,
            blobs,
            notifier,
        })
    }

    // ── Read access ─────────────────────────────────────────

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn doses(&self) -> &[MedicationDose] {
        &self.doses
    }

    pub fn medication(&self, id: &str) -> Option<&Medication> {
        self.medications.iter().find(|m| m.id == id)
    }

    pub fn dose(&self, id: &str) -> Option<&MedicationDose> {
        self.doses.iter().find(|d| d.id == id)
    }

    // ── Medication mutations ────────────────────────────────

    /// Create a medication and today's dose records, one per scheduled time.
    ///
    /// Business validation (date ordering, time format) lives in the form
    /// layer; the store only refuses records missing required fields.
    pub fn add_medication(&mut self, input: NewMedication) -> Result<Medication, StoreError> {
        if let Err(e) = validate_required(&input) {
            self.notifier.notify(Notification::error(
                "Erro ao adicionar medicamento",
                "Preencha todos os campos obrigatórios",
            ));
            return Err(e);
        }

        let medication = Medication {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            dosage: input.dosage,
            frequency: input.frequency,
            times: input.times,
            start_date: input.start_date,
            end_date: input.end_date,
            notes: input.notes,
            active: true,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        // Today's schedule, derived from the times list. Dose ids are tied
        // to the medication id and the time's position.
        let today = seed::today();
        let new_doses: Vec<MedicationDose> = medication
            .times
            .iter()
            .enumerate()
            .map(|(index, time)| MedicationDose {
                id: format!("{}-{index}", medication.id),
                medication_id: medication.id.clone(),
                medication_name: medication.name.clone(),
                dosage: medication.dosage.clone(),
                date: today.clone(),
                time: time.clone(),
                status: DoseStatus::Pending,
            })
            .collect();

        self.medications.push(medication.clone());
        self.doses.extend(new_doses);

        self.persist_medications()?;
        self.persist_doses()?;

        tracing::debug!(id = %medication.id, name = %medication.name, "Medication added");
        self.notifier.notify(Notification::info(
            "Medicamento adicionado",
            format!("{} foi adicionado com sucesso!", medication.name),
        ));
        Ok(medication)
    }

    /// Merge partial fields into a medication. A changed name or dosage is
    /// propagated to every dose of that medication; date, time, status and
    /// id on the doses are untouched.
    pub fn update_medication(
        &mut self,
        id: &str,
        update: MedicationUpdate,
    ) -> Result<(), StoreError> {
        let Some(index) = self.medications.iter().position(|m| m.id == id) else {
            return Err(self.medication_not_found(id));
        };

        let renames = update.name.is_some() || update.dosage.is_some();
        let medication = &mut self.medications[index];
        medication.apply(update);

        if renames {
            let (name, dosage) = (medication.name.clone(), medication.dosage.clone());
            for dose in self.doses.iter_mut().filter(|d| d.medication_id == id) {
                dose.medication_name = name.clone();
                dose.dosage = dosage.clone();
            }
        }

        self.persist_medications()?;
        self.persist_doses()?;

        self.notifier.notify(Notification::info(
            "Medicamento atualizado",
            "As alterações foram salvas com sucesso!",
        ));
        Ok(())
    }

    /// Remove a medication and cascade-delete all of its doses.
    pub fn delete_medication(&mut self, id: &str) -> Result<(), StoreError> {
        if self.medication(id).is_none() {
            return Err(self.medication_not_found(id));
        }

        self.medications.retain(|m| m.id != id);
        self.doses.retain(|d| d.medication_id != id);

        self.persist_medications()?;
        self.persist_doses()?;

        tracing::debug!(id, "Medication deleted (doses cascaded)");
        self.notifier.notify(Notification::info(
            "Medicamento removido",
            "O medicamento foi removido com sucesso!",
        ));
        Ok(())
    }

    /// Flip a medication's active flag. Existing doses are unaffected.
    /// Returns the new state.
    pub fn toggle_medication_status(&mut self, id: &str) -> Result<bool, StoreError> {
        let Some(index) = self.medications.iter().position(|m| m.id == id) else {
            return Err(self.medication_not_found(id));
        };

        let medication = &mut self.medications[index];
        medication.active = !medication.active;
        let (active, name) = (medication.active, medication.name.clone());

        self.persist_medications()?;

        let verb = if active { "ativado" } else { "desativado" };
        self.notifier.notify(Notification::info(
            format!("Medicamento {verb}"),
            format!("{name} foi {verb} com sucesso!"),
        ));
        Ok(active)
    }

    // ── Dose mutations ──────────────────────────────────────

    /// Mark a dose taken. No guard against re-marking: the user's latest
    /// word wins, even over a prior taken/missed.
    pub fn mark_dose_as_taken(&mut self, id: &str) -> Result<(), StoreError> {
        let name = self.set_dose_status(id, DoseStatus::Taken)?;
        self.notifier.notify(Notification::info(
            "Dose registrada",
            format!("{name} marcado como tomado!"),
        ));
        Ok(())
    }

    /// Mark a dose missed. Same last-write-wins semantics as taken.
    pub fn mark_dose_as_missed(&mut self, id: &str) -> Result<(), StoreError> {
        let name = self.set_dose_status(id, DoseStatus::Missed)?;
        self.notifier.notify(Notification::error(
            "Dose não tomada",
            format!("{name} marcado como não tomado."),
        ));
        Ok(())
    }

    fn set_dose_status(&mut self, id: &str, status: DoseStatus) -> Result<String, StoreError> {
        let Some(index) = self.doses.iter().position(|d| d.id == id) else {
            self.notifier.notify(Notification::error(
                "Erro ao registrar dose",
                "Dose não encontrada",
            ));
            return Err(StoreError::DoseNotFound { id: id.to_string() });
        };

        let dose = &mut self.doses[index];
        dose.status = status;
        let name = dose.medication_name.clone();
        self.persist_doses()?;
        Ok(name)
    }

    // ── Persistence ─────────────────────────────────────────

    fn persist_medications(&self) -> Result<(), StoreError> {
        write_collection(&*self.blobs, MEDICATIONS_KEY, &self.medications)?;
        Ok(())
    }

    fn persist_doses(&self) -> Result<(), StoreError> {
        write_collection(&*self.blobs, DOSES_KEY, &self.doses)?;
        Ok(())
    }

    fn medication_not_found(&self, id: &str) -> StoreError {
        self.notifier.notify(Notification::error(
            "Medicamento não encontrado",
            "O medicamento solicitado não existe",
        ));
        StoreError::MedicationNotFound { id: id.to_string() }
    }
}

fn validate_required(input: &NewMedication) -> Result<(), StoreError> {
    if input.name.trim().is_empty() {
        return Err(StoreError::MissingField { field: "name" });
    }
    if input.dosage.trim().is_empty() {
        return Err(StoreError::MissingField { field: "dosage" });
    }
    if input.frequency.trim().is_empty() {
        return Err(StoreError::MissingField { field: "frequency" });
    }
    if input.times.is_empty() {
        return Err(StoreError::MissingField { field: "times" });
    }
    if input.start_date.trim().is_empty() {
        return Err(StoreError::MissingField { field: "startDate" });
    }
    Ok(())
}

/// Read a JSON collection blob. Absent and corrupt blobs both yield `None`;
/// corruption is logged so the reset to seed data is visible.
fn read_collection<T: DeserializeOwned>(
    blobs: &dyn BlobStore,
    key: &str,
) -> Result<Option<Vec<T>>, StoreError> {
    let Some(raw) = blobs.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Ok(Some(items)),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding corrupt persisted blob");
            Ok(None)
        }
    }
}

fn write_collection<T: Serialize>(
    blobs: &dyn BlobStore,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(items).map_err(StorageError::from)?;
    blobs.put(key, &raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::notify::{MemoryNotifier, Severity};
    use crate::storage::MemoryBlobStore;

    fn ibuprofeno() -> NewMedication {
        NewMedication {
            name: "Ibuprofeno".into(),
            dosage: "1 comprimido".into(),
            frequency: "2x ao dia".into(),
            times: vec!["09:00".into(), "21:00".into()],
            start_date: "2025-01-01".into(),
            end_date: None,
            notes: None,
        }
    }

    /// A store over empty (but present) collections, so tests start from a
    /// clean slate instead of the seed dataset.
    fn empty_store() -> (MedicationStore, Arc<MemoryBlobStore>, Arc<MemoryNotifier>) {
        let blobs = Arc::new(MemoryBlobStore::new());
        blobs.put(MEDICATIONS_KEY, "[]").unwrap();
        blobs.put(DOSES_KEY, "[]").unwrap();
        let notifier = Arc::new(MemoryNotifier::new());
        let store =
            MedicationStore::load(Box::new(Arc::clone(&blobs)), Box::new(Arc::clone(&notifier)))
                .unwrap();
        (store, blobs, notifier)
    }

    #[test]
    fn first_run_seeds_demo_dataset_and_persists_it() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let store = MedicationStore::load(
            Box::new(Arc::clone(&blobs)),
            Box::new(MemoryNotifier::new()),
        )
        .unwrap();

        assert_eq!(store.medications().len(), 3);
        assert_eq!(store.doses().len(), 8);
        // Seed is persisted immediately, not just held in memory
        assert!(blobs.get(MEDICATIONS_KEY).unwrap().is_some());
        assert!(blobs.get(DOSES_KEY).unwrap().is_some());
    }

    #[test]
    fn reload_round_trips_collections_exactly() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let mut store = MedicationStore::load(
            Box::new(Arc::clone(&blobs)),
            Box::new(MemoryNotifier::new()),
        )
        .unwrap();
        store.add_medication(ibuprofeno()).unwrap();

        let (meds, doses) = (store.medications().to_vec(), store.doses().to_vec());
        drop(store);

        let reloaded = MedicationStore::load(
            Box::new(Arc::clone(&blobs)),
            Box::new(MemoryNotifier::new()),
        )
        .unwrap();
        assert_eq!(reloaded.medications(), meds.as_slice());
        assert_eq!(reloaded.doses(), doses.as_slice());
    }

    #[test]
    fn corrupt_blob_resets_to_seed() {
        let blobs = Arc::new(MemoryBlobStore::new());
        blobs.put(MEDICATIONS_KEY, "{not json").unwrap();
        blobs.put(DOSES_KEY, "[{\"wrong\": \"shape\"}]").unwrap();

        let store = MedicationStore::load(
            Box::new(Arc::clone(&blobs)),
            Box::new(MemoryNotifier::new()),
        )
        .unwrap();
        assert_eq!(store.medications().len(), 3);
        assert_eq!(store.doses().len(), 8);
    }

    #[test]
    fn add_medication_derives_one_pending_dose_per_time() {
        let (mut store, _, notifier) = empty_store();

        let med = store.add_medication(ibuprofeno()).unwrap();

        assert_eq!(store.medications().len(), 1);
        assert!(med.active);
        assert_eq!(store.doses().len(), 2);

        let today = seed::today();
        for (index, dose) in store.doses().iter().enumerate() {
            assert_eq!(dose.id, format!("{}-{index}", med.id));
            assert_eq!(dose.medication_id, med.id);
            assert_eq!(dose.medication_name, "Ibuprofeno");
            assert_eq!(dose.date, today);
            assert_eq!(dose.status, DoseStatus::Pending);
        }
        assert_eq!(store.doses()[0].time, "09:00");
        assert_eq!(store.doses()[1].time, "21:00");

        let toast = notifier.last().unwrap();
        assert_eq!(toast.severity, Severity::Info);
        assert!(toast.body.contains("Ibuprofeno"));
    }

    #[test]
    fn add_medication_persists_both_collections() {
        let (mut store, blobs, _) = empty_store();
        store.add_medication(ibuprofeno()).unwrap();

        let meds: Vec<Medication> =
            serde_json::from_str(&blobs.get(MEDICATIONS_KEY).unwrap().unwrap()).unwrap();
        let doses: Vec<MedicationDose> =
            serde_json::from_str(&blobs.get(DOSES_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(meds.len(), 1);
        assert_eq!(doses.len(), 2);
    }

    #[test]
    fn add_medication_rejects_missing_required_fields() {
        let (mut store, _, notifier) = empty_store();

        let mut input = ibuprofeno();
        input.name = "  ".into();
        let err = store.add_medication(input).unwrap_err();
        assert!(matches!(err, StoreError::MissingField { field: "name" }));

        let mut input = ibuprofeno();
        input.times.clear();
        let err = store.add_medication(input).unwrap_err();
        assert!(matches!(err, StoreError::MissingField { field: "times" }));

        // No state change, and the failure was surfaced to the user
        assert!(store.medications().is_empty());
        assert!(store.doses().is_empty());
        assert_eq!(notifier.last().unwrap().severity, Severity::Error);
    }

    #[test]
    fn update_propagates_name_and_dosage_to_doses() {
        let (mut store, _, _) = empty_store();
        let med = store.add_medication(ibuprofeno()).unwrap();
        let before = store.doses().to_vec();

        store
            .update_medication(
                &med.id,
                MedicationUpdate {
                    name: Some("Ibuprofeno 600mg".into()),
                    dosage: Some("2 comprimidos".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        for (dose, old) in store.doses().iter().zip(&before) {
            assert_eq!(dose.medication_name, "Ibuprofeno 600mg");
            assert_eq!(dose.dosage, "2 comprimidos");
            // Everything else on the dose is preserved
            assert_eq!(dose.id, old.id);
            assert_eq!(dose.date, old.date);
            assert_eq!(dose.time, old.time);
            assert_eq!(dose.status, old.status);
        }
    }

    #[test]
    fn update_without_rename_leaves_doses_alone() {
        let (mut store, _, _) = empty_store();
        let med = store.add_medication(ibuprofeno()).unwrap();
        let before = store.doses().to_vec();

        store
            .update_medication(
                &med.id,
                MedicationUpdate {
                    notes: Some("Com alimentos".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(store.doses(), before.as_slice());
        assert_eq!(
            store.medication(&med.id).unwrap().notes.as_deref(),
            Some("Com alimentos")
        );
    }

    #[test]
    fn update_unknown_id_fails_without_mutation() {
        let (mut store, blobs, _) = empty_store();
        store.add_medication(ibuprofeno()).unwrap();
        let persisted = blobs.get(MEDICATIONS_KEY).unwrap();

        let err = store
            .update_medication("missing", MedicationUpdate::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::MedicationNotFound { .. }));
        assert_eq!(blobs.get(MEDICATIONS_KEY).unwrap(), persisted);
    }

    #[test]
    fn delete_cascades_to_doses_only_for_that_medication() {
        let (mut store, _, _) = empty_store();
        let first = store.add_medication(ibuprofeno()).unwrap();
        let mut other = ibuprofeno();
        other.name = "Dipirona".into();
        other.times = vec!["10:00".into()];
        let second = store.add_medication(other).unwrap();

        store.delete_medication(&first.id).unwrap();

        assert!(store.medication(&first.id).is_none());
        assert!(store.medication(&second.id).is_some());
        assert_eq!(store.doses().len(), 1);
        assert_eq!(store.doses()[0].medication_id, second.id);
    }

    #[test]
    fn delete_unknown_id_fails() {
        let (mut store, _, _) = empty_store();
        let err = store.delete_medication("missing").unwrap_err();
        assert!(matches!(err, StoreError::MedicationNotFound { .. }));
    }

    #[test]
    fn toggle_flips_active_and_spares_doses() {
        let (mut store, _, notifier) = empty_store();
        let med = store.add_medication(ibuprofeno()).unwrap();

        assert!(!store.toggle_medication_status(&med.id).unwrap());
        assert!(!store.medication(&med.id).unwrap().active);
        assert_eq!(store.doses().len(), 2);
        assert!(notifier.last().unwrap().title.contains("desativado"));

        assert!(store.toggle_medication_status(&med.id).unwrap());
        assert!(notifier.last().unwrap().title.contains("ativado"));
    }

    #[test]
    fn dose_marking_is_last_write_wins() {
        let (mut store, _, _) = empty_store();
        let med = store.add_medication(ibuprofeno()).unwrap();
        let dose_id = format!("{}-0", med.id);

        store.mark_dose_as_taken(&dose_id).unwrap();
        assert_eq!(store.dose(&dose_id).unwrap().status, DoseStatus::Taken);

        // Re-marking a terminal status is allowed; latest action wins
        store.mark_dose_as_missed(&dose_id).unwrap();
        assert_eq!(store.dose(&dose_id).unwrap().status, DoseStatus::Missed);
    }

    #[test]
    fn dose_marking_persists_doses_blob() {
        let (mut store, blobs, _) = empty_store();
        let med = store.add_medication(ibuprofeno()).unwrap();
        let dose_id = format!("{}-1", med.id);

        store.mark_dose_as_taken(&dose_id).unwrap();

        let doses: Vec<MedicationDose> =
            serde_json::from_str(&blobs.get(DOSES_KEY).unwrap().unwrap()).unwrap();
        let dose = doses.iter().find(|d| d.id == dose_id).unwrap();
        assert_eq!(dose.status, DoseStatus::Taken);
    }

    #[test]
    fn marking_unknown_dose_fails_loudly() {
        let (mut store, _, notifier) = empty_store();
        let err = store.mark_dose_as_taken("ghost").unwrap_err();
        assert!(matches!(err, StoreError::DoseNotFound { .. }));
        assert_eq!(notifier.last().unwrap().severity, Severity::Error);
    }
}
