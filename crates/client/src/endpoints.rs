//! Request paths of the clinic backend.

use clinicdesk_core::models::schedule::Day;

pub const LOGIN: &str = "/api/v1/auth/login";
pub const LOGOUT: &str = "/api/v1/auth/logout";

pub const PATIENTS: &str = "/api/v1/admin/patients";
pub const CONSULTATIONS: &str = "/api/v1/admin/consultations";
pub const CONSULTATIONS_OVERVIEW: &str = "/api/v1/admin/consultations/overview";
pub const SCHEDULES: &str = "/api/v1/admin/schedules";
pub const ANALYTICS: &str = "/api/v1/admin/analytics";

pub fn patient(id: i64) -> String {
    format!("{PATIENTS}/{id}")
}

pub fn patient_consultations(id: i64) -> String {
    format!("{PATIENTS}/{id}/consultations")
}

pub fn check_available_schedule(patient_id: i64) -> String {
    format!("/patients/patient_registrations/{patient_id}/check_available_schedule")
}

pub fn booked_slot(id: i64) -> String {
    format!("/api/v1/admin/booked_slots/{id}")
}

pub fn consultation(id: i64) -> String {
    format!("{CONSULTATIONS}/{id}")
}

pub fn consultation_cancel(id: i64) -> String {
    format!("{CONSULTATIONS}/{id}/cancel")
}

pub fn consultation_status(id: i64) -> String {
    format!("{CONSULTATIONS}/{id}/status")
}

pub fn prescription_notes(consultation_id: i64) -> String {
    format!("{CONSULTATIONS}/{consultation_id}/prescription_notes")
}

pub fn prescription_note(consultation_id: i64, note_id: i64) -> String {
    format!("{CONSULTATIONS}/{consultation_id}/prescription_notes/{note_id}")
}

pub fn general_schedule(day: Day) -> String {
    format!("{SCHEDULES}/general/{day}")
}

pub fn schedule(id: i64) -> String {
    format!("{SCHEDULES}/{id}")
}

pub fn schedule_status(id: i64) -> String {
    format!("{SCHEDULES}/{id}/toggle_status")
}
