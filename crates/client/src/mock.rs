use async_trait::async_trait;
use clinicdesk_core::errors::ClinicResult;
use clinicdesk_core::models::{
    analytics::{Analytics, DateRange},
    appointment::{Appointment, AppointmentQuery, NewConsultation, Overview, StatusChange},
    auth::{Credentials, Session},
    availability::{AvailabilityQuery, AvailableSlot},
    booked_slot::{BookedSlot, RescheduleRequest},
    pagination::Page,
    patient::{NewPatient, Patient, PatientQuery, PatientUpdate},
    prescription::{NoteInput, PrescriptionNote},
    schedule::{CustomSchedule, CustomScheduleInput, Day, GeneralSchedule, ScheduleWindow},
};
use mockall::mock;

use crate::api::ClinicApi;

// Mock backend for store and front end tests
mock! {
    pub ClinicApi {}

    #[async_trait]
    impl ClinicApi for ClinicApi {
        async fn login(&self, credentials: &Credentials) -> ClinicResult<Session>;
        async fn logout(&self) -> ClinicResult<()>;

        async fn list_patients(&self, query: &PatientQuery) -> ClinicResult<Page<Patient>>;
        async fn get_patient(&self, id: i64) -> ClinicResult<Patient>;
        async fn create_patient(&self, patient: &NewPatient) -> ClinicResult<Patient>;
        async fn update_patient(&self, id: i64, update: &PatientUpdate) -> ClinicResult<Patient>;
        async fn patient_history(&self, patient_id: i64) -> ClinicResult<Vec<Appointment>>;

        async fn list_general_schedules(
            &self,
            page: u32,
            per_page: u32,
        ) -> ClinicResult<Page<GeneralSchedule>>;
        async fn list_custom_schedules(
            &self,
            page: u32,
            per_page: u32,
        ) -> ClinicResult<Page<CustomSchedule>>;
        async fn update_general_schedule(
            &self,
            day: Day,
            window: &ScheduleWindow,
        ) -> ClinicResult<GeneralSchedule>;
        async fn create_custom_schedule(
            &self,
            input: &CustomScheduleInput,
        ) -> ClinicResult<CustomSchedule>;
        async fn update_custom_schedule(
            &self,
            id: i64,
            input: &CustomScheduleInput,
        ) -> ClinicResult<CustomSchedule>;
        async fn delete_custom_schedule(&self, id: i64) -> ClinicResult<()>;
        async fn set_custom_schedule_status(
            &self,
            id: i64,
            status: bool,
        ) -> ClinicResult<CustomSchedule>;

        async fn available_slots(&self, query: &AvailabilityQuery) -> ClinicResult<Vec<AvailableSlot>>;
        async fn reschedule(
            &self,
            booked_slot_id: i64,
            request: &RescheduleRequest,
        ) -> ClinicResult<BookedSlot>;

        async fn list_appointments(&self, query: &AppointmentQuery) -> ClinicResult<Page<Appointment>>;
        async fn get_appointment(&self, id: i64) -> ClinicResult<Appointment>;
        async fn overview(&self) -> ClinicResult<Overview>;
        async fn book_consultation(&self, consultation: &NewConsultation) -> ClinicResult<Appointment>;
        async fn cancel_appointment(&self, id: i64) -> ClinicResult<Appointment>;
        async fn update_appointment_status(
            &self,
            id: i64,
            change: &StatusChange,
        ) -> ClinicResult<Appointment>;

        async fn list_notes(&self, consultation_id: i64) -> ClinicResult<Vec<PrescriptionNote>>;
        async fn create_note(
            &self,
            consultation_id: i64,
            note: &NoteInput,
        ) -> ClinicResult<PrescriptionNote>;
        async fn update_note(
            &self,
            consultation_id: i64,
            note_id: i64,
            note: &NoteInput,
        ) -> ClinicResult<PrescriptionNote>;
        async fn delete_note(&self, consultation_id: i64, note_id: i64) -> ClinicResult<()>;

        async fn analytics(&self, range: &DateRange) -> ClinicResult<Analytics>;
    }
}
