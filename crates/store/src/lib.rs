//! # ClinicDesk Store
//!
//! Application state between the API client and the front end. Each store
//! owns the cached data of one area and the rules for changing it:
//!
//! - **Auth**: sign in, sign out, forced logout notifications
//! - **Patients**: paged list, debounced search, optimistic status toggle
//! - **Schedules**: general and custom lists, optimistic delete and toggle
//! - **Appointments**: dashboard tabs, details, overview, patient histories
//! - **Slots**, **Reschedule**, **Booking**: the slot selection workflow
//! - **Prescriptions** and **Analytics**
//!
//! Stores never hold a lock across a request.

pub mod analytics;
pub mod appointments;
pub mod auth;
pub mod booking;
pub mod cache;
pub mod cancel;
pub mod debounce;
pub mod mutation;
pub mod patients;
pub mod prescriptions;
pub mod reschedule;
pub mod schedules;
pub mod slots;

use std::sync::Arc;

use clinicdesk_client::{ClinicApi, SessionHandle, config::ClientConfig};

pub use analytics::AnalyticsStore;
pub use appointments::AppointmentStore;
pub use auth::AuthStore;
pub use booking::BookingFlow;
pub use patients::PatientStore;
pub use prescriptions::PrescriptionStore;
pub use reschedule::RescheduleFlow;
pub use schedules::ScheduleStore;
pub use slots::SlotPicker;

/// Every store wired to one API client.
pub struct Stores {
    pub api: Arc<dyn ClinicApi>,
    pub auth: AuthStore,
    pub patients: Arc<PatientStore>,
    pub schedules: ScheduleStore,
    pub appointments: Arc<AppointmentStore>,
    pub prescriptions: PrescriptionStore,
    pub analytics: Arc<AnalyticsStore>,
    pub reschedule: RescheduleFlow,
    pub booking: BookingFlow,
}

impl Stores {
    pub fn new(api: Arc<dyn ClinicApi>, session: SessionHandle, config: &ClientConfig) -> Self {
        let patients = Arc::new(PatientStore::new(
            api.clone(),
            config.page_size,
            config.search_debounce,
        ));
        let analytics = Arc::new(AnalyticsStore::new(api.clone()));
        let appointments = Arc::new(
            AppointmentStore::new(api.clone(), config.page_size).with_analytics(analytics.clone()),
        );

        Self {
            auth: AuthStore::new(api.clone(), session),
            schedules: ScheduleStore::new(api.clone(), config.page_size),
            prescriptions: PrescriptionStore::new(api.clone()),
            reschedule: RescheduleFlow::new(api.clone(), appointments.clone()),
            booking: BookingFlow::new(api.clone(), appointments.clone(), patients.clone()),
            patients,
            appointments,
            analytics,
            api,
        }
    }

    /// Picker for booking or rescheduling on behalf of `patient_id`.
    pub fn slot_picker(&self, patient_id: i64, registered: bool) -> SlotPicker {
        SlotPicker::new(self.api.clone(), patient_id, registered)
    }
}
