//! # HTTP Client
//!
//! reqwest implementation of [`ClinicApi`]. Every request carries the bearer
//! token from the shared [`SessionHandle`]; a 401 answer drops the session
//! (forced logout) and surfaces as [`ClinicError::Authentication`].

use async_trait::async_trait;
use clinicdesk_core::errors::{ClinicError, ClinicResult};
use clinicdesk_core::models::{
    analytics::{Analytics, DateRange},
    appointment::{Appointment, AppointmentQuery, NewConsultation, Overview, StatusChange},
    auth::{Credentials, LoginResponse, Session},
    availability::{AvailabilityQuery, AvailabilityResponse, AvailableSlot, normalize_slots},
    booked_slot::{BookedSlot, RescheduleRequest},
    pagination::Page,
    patient::{NewPatient, Patient, PatientQuery, PatientUpdate},
    prescription::{NoteInput, PrescriptionNote},
    schedule::{
        CustomSchedule, CustomScheduleInput, Day, GeneralSchedule, ScheduleKind, ScheduleWindow,
    },
};
use eyre::WrapErr;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::api::ClinicApi;
use crate::config::ClientConfig;
use crate::endpoints;
use crate::response::{decode, decode_page, error_from};
use crate::session::SessionHandle;

#[derive(Clone)]
pub struct HttpClinicApi {
    http: reqwest::Client,
    config: ClientConfig,
    session: SessionHandle,
}

impl HttpClinicApi {
    pub fn new(config: ClientConfig, session: SessionHandle) -> ClinicResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .wrap_err("Failed to build HTTP client")?;

        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.config.url(path))
    }

    /// Sends the request with the current bearer token and turns error
    /// statuses into [`ClinicError`]s.
    async fn execute(&self, builder: RequestBuilder) -> ClinicResult<Response> {
        let builder = match self.session.access_token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let request = builder
            .build()
            .wrap_err("Failed to build request")?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!(%method, %path, "Sending request");

        let response = self
            .http
            .execute(request)
            .await
            .wrap_err_with(|| format!("{method} {path} failed"))?;

        let status = response.status();
        debug!(%method, %path, status = status.as_u16(), "Received response");

        if status == StatusCode::UNAUTHORIZED {
            let err = error_from(response).await;
            self.session.expire().await;
            return Err(match err {
                ClinicError::Authentication(_) => err,
                other => ClinicError::Authentication(other.user_message()),
            });
        }
        if !status.is_success() {
            return Err(error_from(response).await);
        }
        Ok(response)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClinicResult<T> {
        let response = self.execute(builder).await?;
        decode(response).await
    }

    async fn send_page<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClinicResult<Page<T>> {
        let response = self.execute(builder).await?;
        decode_page(response).await
    }

    async fn send_empty(&self, builder: RequestBuilder) -> ClinicResult<()> {
        self.execute(builder).await?;
        Ok(())
    }

    fn schedule_list(&self, kind: ScheduleKind, page: u32, per_page: u32) -> RequestBuilder {
        self.request(Method::GET, endpoints::SCHEDULES).query(&[
            ("type", kind.as_str().to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ])
    }
}

#[async_trait]
impl ClinicApi for HttpClinicApi {
    async fn login(&self, credentials: &Credentials) -> ClinicResult<Session> {
        let response: LoginResponse = self
            .send(self.request(Method::POST, endpoints::LOGIN).json(credentials))
            .await?;
        Ok(response.into())
    }

    async fn logout(&self) -> ClinicResult<()> {
        self.send_empty(self.request(Method::DELETE, endpoints::LOGOUT))
            .await
    }

    async fn list_patients(&self, query: &PatientQuery) -> ClinicResult<Page<Patient>> {
        self.send_page(self.request(Method::GET, endpoints::PATIENTS).query(query))
            .await
    }

    async fn get_patient(&self, id: i64) -> ClinicResult<Patient> {
        self.send(self.request(Method::GET, &endpoints::patient(id)))
            .await
    }

    async fn create_patient(&self, patient: &NewPatient) -> ClinicResult<Patient> {
        self.send(
            self.request(Method::POST, endpoints::PATIENTS)
                .json(&json!({ "patient": patient })),
        )
        .await
    }

    async fn update_patient(&self, id: i64, update: &PatientUpdate) -> ClinicResult<Patient> {
        self.send(
            self.request(Method::PUT, &endpoints::patient(id))
                .json(&json!({ "patient": update })),
        )
        .await
    }

    async fn patient_history(&self, patient_id: i64) -> ClinicResult<Vec<Appointment>> {
        self.send(self.request(Method::GET, &endpoints::patient_consultations(patient_id)))
            .await
    }

    async fn list_general_schedules(
        &self,
        page: u32,
        per_page: u32,
    ) -> ClinicResult<Page<GeneralSchedule>> {
        self.send_page(self.schedule_list(ScheduleKind::General, page, per_page))
            .await
    }

    async fn list_custom_schedules(
        &self,
        page: u32,
        per_page: u32,
    ) -> ClinicResult<Page<CustomSchedule>> {
        self.send_page(self.schedule_list(ScheduleKind::Custom, page, per_page))
            .await
    }

    async fn update_general_schedule(
        &self,
        day: Day,
        window: &ScheduleWindow,
    ) -> ClinicResult<GeneralSchedule> {
        self.send(
            self.request(Method::PUT, &endpoints::general_schedule(day))
                .json(&json!({ "schedule": window })),
        )
        .await
    }

    async fn create_custom_schedule(
        &self,
        input: &CustomScheduleInput,
    ) -> ClinicResult<CustomSchedule> {
        self.send(
            self.request(Method::POST, endpoints::SCHEDULES)
                .json(&json!({ "schedule": input })),
        )
        .await
    }

    async fn update_custom_schedule(
        &self,
        id: i64,
        input: &CustomScheduleInput,
    ) -> ClinicResult<CustomSchedule> {
        self.send(
            self.request(Method::PUT, &endpoints::schedule(id))
                .json(&json!({ "schedule": input })),
        )
        .await
    }

    async fn delete_custom_schedule(&self, id: i64) -> ClinicResult<()> {
        self.send_empty(self.request(Method::DELETE, &endpoints::schedule(id)))
            .await
    }

    async fn set_custom_schedule_status(
        &self,
        id: i64,
        status: bool,
    ) -> ClinicResult<CustomSchedule> {
        self.send(
            self.request(Method::PATCH, &endpoints::schedule_status(id))
                .json(&json!({ "status": status })),
        )
        .await
    }

    async fn available_slots(&self, query: &AvailabilityQuery) -> ClinicResult<Vec<AvailableSlot>> {
        let response: AvailabilityResponse = self
            .send(
                self.request(
                    Method::GET,
                    &endpoints::check_available_schedule(query.patient_id),
                )
                .query(&[
                    ("date", query.date.format("%Y-%m-%d").to_string()),
                    ("registered", query.registered.to_string()),
                ]),
            )
            .await?;
        Ok(normalize_slots(response))
    }

    async fn reschedule(
        &self,
        booked_slot_id: i64,
        request: &RescheduleRequest,
    ) -> ClinicResult<BookedSlot> {
        self.send(
            self.request(Method::PUT, &endpoints::booked_slot(booked_slot_id))
                .json(request),
        )
        .await
    }

    async fn list_appointments(&self, query: &AppointmentQuery) -> ClinicResult<Page<Appointment>> {
        self.send_page(self.request(Method::GET, endpoints::CONSULTATIONS).query(query))
            .await
    }

    async fn get_appointment(&self, id: i64) -> ClinicResult<Appointment> {
        self.send(self.request(Method::GET, &endpoints::consultation(id)))
            .await
    }

    async fn overview(&self) -> ClinicResult<Overview> {
        self.send(self.request(Method::GET, endpoints::CONSULTATIONS_OVERVIEW))
            .await
    }

    async fn book_consultation(&self, consultation: &NewConsultation) -> ClinicResult<Appointment> {
        self.send(
            self.request(Method::POST, endpoints::CONSULTATIONS)
                .json(&json!({ "consultation": consultation })),
        )
        .await
    }

    async fn cancel_appointment(&self, id: i64) -> ClinicResult<Appointment> {
        self.send(self.request(Method::PATCH, &endpoints::consultation_cancel(id)))
            .await
    }

    async fn update_appointment_status(
        &self,
        id: i64,
        change: &StatusChange,
    ) -> ClinicResult<Appointment> {
        self.send(
            self.request(Method::PATCH, &endpoints::consultation_status(id))
                .json(change),
        )
        .await
    }

    async fn list_notes(&self, consultation_id: i64) -> ClinicResult<Vec<PrescriptionNote>> {
        self.send(self.request(Method::GET, &endpoints::prescription_notes(consultation_id)))
            .await
    }

    async fn create_note(
        &self,
        consultation_id: i64,
        note: &NoteInput,
    ) -> ClinicResult<PrescriptionNote> {
        self.send(
            self.request(Method::POST, &endpoints::prescription_notes(consultation_id))
                .json(&json!({ "prescription_note": note })),
        )
        .await
    }

    async fn update_note(
        &self,
        consultation_id: i64,
        note_id: i64,
        note: &NoteInput,
    ) -> ClinicResult<PrescriptionNote> {
        self.send(
            self.request(
                Method::PUT,
                &endpoints::prescription_note(consultation_id, note_id),
            )
            .json(&json!({ "prescription_note": note })),
        )
        .await
    }

    async fn delete_note(&self, consultation_id: i64, note_id: i64) -> ClinicResult<()> {
        self.send_empty(self.request(
            Method::DELETE,
            &endpoints::prescription_note(consultation_id, note_id),
        ))
        .await
    }

    async fn analytics(&self, range: &DateRange) -> ClinicResult<Analytics> {
        self.send(self.request(Method::GET, endpoints::ANALYTICS).query(&[
            ("from", range.from.format("%Y-%m-%d").to_string()),
            ("to", range.to.format("%Y-%m-%d").to_string()),
        ]))
        .await
    }
}
