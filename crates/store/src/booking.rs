use std::sync::Arc;

use clinicdesk_client::ClinicApi;
use clinicdesk_core::errors::ClinicResult;
use clinicdesk_core::models::appointment::{Appointment, NewConsultation};
use tracing::info;

use crate::appointments::AppointmentStore;
use crate::patients::PatientStore;
use crate::slots::SlotPicker;

/// Books a consultation on the slot selected in a [`SlotPicker`].
pub struct BookingFlow {
    api: Arc<dyn ClinicApi>,
    appointments: Arc<AppointmentStore>,
    patients: Arc<PatientStore>,
}

impl BookingFlow {
    pub fn new(
        api: Arc<dyn ClinicApi>,
        appointments: Arc<AppointmentStore>,
        patients: Arc<PatientStore>,
    ) -> Self {
        Self {
            api,
            appointments,
            patients,
        }
    }

    pub async fn book(&self, picker: &SlotPicker, reason: Option<String>) -> ClinicResult<Appointment> {
        let (slot_date, slot) = picker.selection().await?;
        let consultation = NewConsultation {
            patient_id: picker.patient_id(),
            schedule_id: slot.schedule_id,
            slot_date,
            slot_time: slot.time.clone(),
            reason: reason.filter(|r| !r.trim().is_empty()),
        };

        let appointment = self.api.book_consultation(&consultation).await?;
        info!(
            appointment_id = appointment.id,
            patient_id = consultation.patient_id,
            date = %slot_date,
            time = %slot.time,
            "Consultation booked"
        );

        // Appointment counts show up in the patient list too.
        self.appointments.invalidate_all().await;
        self.patients.invalidate().await;
        picker.reset().await;
        Ok(appointment)
    }
}
