use std::sync::Arc;

use chrono::NaiveDate;
use clinicdesk_client::ClinicApi;
use clinicdesk_core::errors::{ClinicError, ClinicResult};
use clinicdesk_core::models::{
    availability::AvailableSlot,
    booked_slot::{BookedSlot, RescheduleRequest},
};
use tracing::{info, warn};

use crate::appointments::AppointmentStore;
use crate::slots::SlotPicker;

/// Moves a booked slot to another date and time.
///
/// Nothing local changes before the backend confirms; on success every
/// appointment view is invalidated.
pub struct RescheduleFlow {
    api: Arc<dyn ClinicApi>,
    appointments: Arc<AppointmentStore>,
}

impl RescheduleFlow {
    pub fn new(api: Arc<dyn ClinicApi>, appointments: Arc<AppointmentStore>) -> Self {
        Self { api, appointments }
    }

    pub async fn submit(
        &self,
        booked_slot_id: i64,
        date: NaiveDate,
        slot: &AvailableSlot,
    ) -> ClinicResult<BookedSlot> {
        if !slot.available {
            return Err(ClinicError::Validation(format!("Slot {} is already taken", slot.time)));
        }

        let request = RescheduleRequest::new(date, slot.time.clone());
        match self.api.reschedule(booked_slot_id, &request).await {
            Ok(booked) => {
                info!(booked_slot_id, date = %date, time = %slot.time, "Appointment rescheduled");
                self.appointments.invalidate_all().await;
                Ok(booked)
            }
            Err(err) => {
                warn!(booked_slot_id, error = %err, "Reschedule failed");
                Err(err)
            }
        }
    }

    /// Submits whatever the picker has selected.
    pub async fn submit_selection(&self, booked_slot_id: i64, picker: &SlotPicker) -> ClinicResult<BookedSlot> {
        let (date, slot) = picker.selection().await?;
        let booked = self.submit(booked_slot_id, date, &slot).await?;
        picker.reset().await;
        Ok(booked)
    }
}
