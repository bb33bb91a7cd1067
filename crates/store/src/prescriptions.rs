use std::collections::HashMap;
use std::sync::Arc;

use clinicdesk_client::ClinicApi;
use clinicdesk_core::errors::{ClinicError, ClinicResult};
use clinicdesk_core::models::prescription::{NoteInput, PrescriptionNote};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::mutation::MutationLedger;

/// Prescription notes per consultation.
pub struct PrescriptionStore {
    api: Arc<dyn ClinicApi>,
    notes: RwLock<HashMap<i64, Vec<PrescriptionNote>>>,
    ledger: MutationLedger,
}

impl PrescriptionStore {
    pub fn new(api: Arc<dyn ClinicApi>) -> Self {
        Self {
            api,
            notes: RwLock::new(HashMap::new()),
            ledger: MutationLedger::new(),
        }
    }

    pub async fn load(&self, consultation_id: i64) -> ClinicResult<Vec<PrescriptionNote>> {
        let notes = self.api.list_notes(consultation_id).await?;
        self.notes
            .write()
            .await
            .insert(consultation_id, notes.clone());
        Ok(notes)
    }

    pub async fn notes(&self, consultation_id: i64) -> Vec<PrescriptionNote> {
        self.notes
            .read()
            .await
            .get(&consultation_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn create(&self, consultation_id: i64, input: &NoteInput) -> ClinicResult<PrescriptionNote> {
        input.validate()?;
        let note = self.api.create_note(consultation_id, input).await?;
        info!(consultation_id, note_id = note.id, "Prescription note added");

        self.notes
            .write()
            .await
            .entry(consultation_id)
            .or_default()
            .push(note.clone());
        Ok(note)
    }

    pub async fn update(
        &self,
        consultation_id: i64,
        note_id: i64,
        input: &NoteInput,
    ) -> ClinicResult<PrescriptionNote> {
        input.validate()?;
        let note = self.api.update_note(consultation_id, note_id, input).await?;
        info!(consultation_id, note_id, "Prescription note updated");

        let mut notes = self.notes.write().await;
        let entries = notes.entry(consultation_id).or_default();
        match entries.iter_mut().find(|n| n.id == note_id) {
            Some(existing) => *existing = note.clone(),
            None => entries.push(note.clone()),
        }
        Ok(note)
    }

    pub async fn delete(&self, consultation_id: i64, note_id: i64) -> ClinicResult<()> {
        let (index, removed) = {
            let mut notes = self.notes.write().await;
            let entries = notes.entry(consultation_id).or_default();
            let index = entries
                .iter()
                .position(|n| n.id == note_id)
                .ok_or_else(|| ClinicError::NotFound(format!("Prescription note {note_id} is not loaded")))?;
            (index, entries.remove(index))
        };

        let result = self
            .ledger
            .track(
                "delete_prescription_note",
                note_id,
                self.api.delete_note(consultation_id, note_id),
            )
            .await;

        if let Err(err) = result {
            let mut notes = self.notes.write().await;
            let entries = notes.entry(consultation_id).or_default();
            let index = index.min(entries.len());
            entries.insert(index, removed);
            warn!(consultation_id, note_id, "Restored prescription note after failed delete");
            return Err(err);
        }
        Ok(())
    }

    pub fn ledger(&self) -> &MutationLedger {
        &self.ledger
    }
}
