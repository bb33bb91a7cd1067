//! Appointment views: dashboard tabs, single appointment details, the global
//! overview and per-patient histories.
//!
//! Every view lives in its own [`QueryCache`]. Mutations that move or change
//! an appointment call [`AppointmentStore::invalidate_all`] so each view
//! refetches on its next read. A linked [`AnalyticsStore`] goes stale with
//! them.

use std::collections::HashMap;
use std::sync::Arc;

use clinicdesk_client::ClinicApi;
use clinicdesk_core::errors::{ClinicError, ClinicResult};
use clinicdesk_core::models::{
    appointment::{Appointment, AppointmentQuery, AppointmentStatus, AppointmentTab, Overview, StatusChange},
    pagination::{Page, Pagination},
};
use tokio::sync::RwLock;
use tracing::info;

use crate::analytics::AnalyticsStore;
use crate::cache::QueryCache;

pub struct AppointmentStore {
    api: Arc<dyn ClinicApi>,
    per_page: u32,
    tabs: QueryCache<AppointmentQuery, Page<Appointment>>,
    details: QueryCache<i64, Appointment>,
    overview: QueryCache<(), Overview>,
    histories: QueryCache<i64, Vec<Appointment>>,
    pagination: RwLock<HashMap<AppointmentTab, Pagination>>,
    analytics: Option<Arc<AnalyticsStore>>,
}

impl AppointmentStore {
    pub fn new(api: Arc<dyn ClinicApi>, per_page: u32) -> Self {
        Self {
            api,
            per_page,
            tabs: QueryCache::new("appointment_tabs"),
            details: QueryCache::new("appointment_details"),
            overview: QueryCache::new("overview"),
            histories: QueryCache::new("patient_histories"),
            pagination: RwLock::new(HashMap::new()),
            analytics: None,
        }
    }

    /// Reports that count appointments, invalidated along with every view.
    pub fn with_analytics(mut self, analytics: Arc<AnalyticsStore>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    /// One page of a dashboard tab. The page is clamped to the tab's known
    /// page range.
    pub async fn tab(
        &self,
        tab: AppointmentTab,
        page: u32,
        search: Option<String>,
    ) -> ClinicResult<Page<Appointment>> {
        let page = self.pagination(tab).await.clamp(page);
        let query = AppointmentQuery {
            tab,
            page,
            per_page: self.per_page,
            search: search.filter(|s| !s.trim().is_empty()),
        };

        let result = self
            .tabs
            .get_or_fetch(query.clone(), || self.api.list_appointments(&query))
            .await?;

        self.pagination
            .write()
            .await
            .entry(tab)
            .or_insert_with(|| Pagination::new(self.per_page))
            .update_from(&result);
        Ok(result)
    }

    pub async fn pagination(&self, tab: AppointmentTab) -> Pagination {
        self.pagination
            .read()
            .await
            .get(&tab)
            .copied()
            .unwrap_or_else(|| Pagination::new(self.per_page))
    }

    pub async fn detail(&self, id: i64) -> ClinicResult<Appointment> {
        self.details
            .get_or_fetch(id, || self.api.get_appointment(id))
            .await
    }

    /// Last fetched copy of an appointment, stale or not.
    pub async fn cached_detail(&self, id: i64) -> Option<Appointment> {
        self.details.peek(&id).await
    }

    pub async fn overview(&self) -> ClinicResult<Overview> {
        self.overview
            .get_or_fetch((), || self.api.overview())
            .await
    }

    pub async fn patient_history(&self, patient_id: i64) -> ClinicResult<Vec<Appointment>> {
        self.histories
            .get_or_fetch(patient_id, || self.api.patient_history(patient_id))
            .await
    }

    pub async fn cancel(&self, id: i64) -> ClinicResult<Appointment> {
        if let Some(cached) = self.details.peek(&id).await {
            let status = cached.derived_status();
            if !status.is_open() {
                return Err(ClinicError::Validation(format!(
                    "A {} appointment can't be cancelled",
                    status.label().to_lowercase()
                )));
            }
        }

        let appointment = self.api.cancel_appointment(id).await?;
        info!(appointment_id = id, "Appointment cancelled");
        self.invalidate_all().await;
        self.details.insert(id, appointment.clone()).await;
        Ok(appointment)
    }

    pub async fn update_status(&self, id: i64, status: AppointmentStatus) -> ClinicResult<Appointment> {
        let change = StatusChange {
            status: raw_status(status).to_string(),
        };
        let appointment = self.api.update_appointment_status(id, &change).await?;
        info!(appointment_id = id, status = %status, "Appointment status updated");
        self.invalidate_all().await;
        self.details.insert(id, appointment.clone()).await;
        Ok(appointment)
    }

    /// Marks every appointment view stale: all tabs, details, the overview,
    /// patient histories and linked analytics reports.
    pub async fn invalidate_all(&self) {
        self.tabs.invalidate_all().await;
        self.details.invalidate_all().await;
        self.overview.invalidate_all().await;
        self.histories.invalidate_all().await;
        if let Some(analytics) = &self.analytics {
            analytics.invalidate().await;
        }
    }

    pub async fn is_tab_stale(&self, query: &AppointmentQuery) -> bool {
        self.tabs.is_stale(query).await
    }

    pub async fn is_detail_stale(&self, id: i64) -> bool {
        self.details.is_stale(&id).await
    }

    pub async fn is_overview_stale(&self) -> bool {
        self.overview.is_stale(&()).await
    }

    pub async fn is_history_stale(&self, patient_id: i64) -> bool {
        self.histories.is_stale(&patient_id).await
    }
}

/// Status string the backend expects for a status change.
fn raw_status(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Upcoming => "booked",
        AppointmentStatus::Completed => "completed",
        AppointmentStatus::Cancelled => "cancelled",
        AppointmentStatus::NoShow => "no_show",
        AppointmentStatus::InProgress => "in_progress",
    }
}
