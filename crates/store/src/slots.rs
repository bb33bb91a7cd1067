use std::sync::Arc;

use chrono::NaiveDate;
use clinicdesk_client::ClinicApi;
use clinicdesk_core::errors::{ClinicError, ClinicResult};
use clinicdesk_core::models::availability::{AvailabilityQuery, AvailableSlot};
use tokio::sync::RwLock;
use tracing::debug;

use crate::cancel::LatestOnly;

/// What the date/time picker shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotPickerState {
    pub date: Option<NaiveDate>,
    pub slots: Vec<AvailableSlot>,
    pub selected: Option<AvailableSlot>,
    pub loading: bool,
    /// Inline error of the last lookup.
    pub error: Option<String>,
}

/// Availability lookup and slot selection for one patient.
pub struct SlotPicker {
    api: Arc<dyn ClinicApi>,
    patient_id: i64,
    registered: bool,
    state: RwLock<SlotPickerState>,
    lookups: LatestOnly,
}

impl SlotPicker {
    pub fn new(api: Arc<dyn ClinicApi>, patient_id: i64, registered: bool) -> Self {
        Self {
            api,
            patient_id,
            registered,
            state: RwLock::new(SlotPickerState::default()),
            lookups: LatestOnly::new(),
        }
    }

    pub fn patient_id(&self) -> i64 {
        self.patient_id
    }

    /// Picks a date: drops the current selection and loads that date's
    /// slots. A later call supersedes an unfinished one, which then returns
    /// [`ClinicError::Cancelled`] without touching the picker.
    pub async fn select_date(&self, date: NaiveDate) -> ClinicResult<Vec<AvailableSlot>> {
        let token = self.lookups.begin().await;
        {
            let mut state = self.state.write().await;
            if token.is_cancelled() {
                return Err(ClinicError::Cancelled);
            }
            state.date = Some(date);
            state.selected = None;
            state.slots.clear();
            state.error = None;
            state.loading = true;
        }

        let query = AvailabilityQuery {
            patient_id: self.patient_id,
            date,
            registered: self.registered,
        };
        debug!(patient_id = self.patient_id, %date, "Looking up available slots");
        let result = token.run(self.api.available_slots(&query)).await;

        let mut state = self.state.write().await;
        if token.is_cancelled() {
            return Err(ClinicError::Cancelled);
        }
        state.loading = false;
        match result {
            Ok(slots) => {
                state.slots = slots.clone();
                Ok(slots)
            }
            Err(err) => {
                state.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Selects one of the loaded slots by its label. Unknown or taken slots
    /// leave the current selection as it was.
    pub async fn select_slot(&self, slot_id: &str) -> ClinicResult<AvailableSlot> {
        let mut state = self.state.write().await;
        let slot = state
            .slots
            .iter()
            .find(|s| s.id == slot_id)
            .cloned()
            .ok_or_else(|| ClinicError::Validation(format!("Slot {slot_id} is not offered on this date")))?;
        if !slot.available {
            return Err(ClinicError::Validation(format!("Slot {slot_id} is already taken")));
        }
        state.selected = Some(slot.clone());
        Ok(slot)
    }

    /// Selected date and slot, or a validation error telling the user what
    /// is missing.
    pub async fn selection(&self) -> ClinicResult<(NaiveDate, AvailableSlot)> {
        let state = self.state.read().await;
        match (state.date, state.selected.clone()) {
            (Some(date), Some(slot)) => Ok((date, slot)),
            (None, _) => Err(ClinicError::Validation("Select a date".into())),
            (Some(_), None) => Err(ClinicError::Validation("Select a time slot".into())),
        }
    }

    pub async fn state(&self) -> SlotPickerState {
        self.state.read().await.clone()
    }

    pub async fn reset(&self) {
        self.lookups.cancel().await;
        *self.state.write().await = SlotPickerState::default();
    }
}
