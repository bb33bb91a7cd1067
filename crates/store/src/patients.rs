use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clinicdesk_client::ClinicApi;
use clinicdesk_core::errors::{ClinicError, ClinicResult};
use clinicdesk_core::models::{
    pagination::{Page, Pagination},
    patient::{NewPatient, Patient, PatientQuery, PatientStatus, PatientUpdate},
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::QueryCache;
use crate::cancel::LatestOnly;
use crate::debounce::Debouncer;
use crate::mutation::MutationLedger;

#[derive(Debug, Clone)]
struct PatientList {
    rows: Vec<Patient>,
    pagination: Pagination,
    search: Option<String>,
    status: Option<PatientStatus>,
}

/// Patient list with search, filtering and status changes.
pub struct PatientStore {
    api: Arc<dyn ClinicApi>,
    list: RwLock<PatientList>,
    pages: QueryCache<PatientQuery, Page<Patient>>,
    details: QueryCache<i64, Patient>,
    debouncer: Debouncer,
    searches: LatestOnly,
    ledger: MutationLedger,
}

impl PatientStore {
    pub fn new(api: Arc<dyn ClinicApi>, per_page: u32, search_debounce: Duration) -> Self {
        Self {
            api,
            list: RwLock::new(PatientList {
                rows: Vec::new(),
                pagination: Pagination::new(per_page),
                search: None,
                status: None,
            }),
            pages: QueryCache::new("patient_pages"),
            details: QueryCache::new("patients"),
            debouncer: Debouncer::new(search_debounce),
            searches: LatestOnly::new(),
            ledger: MutationLedger::new(),
        }
    }

    async fn query_for(&self, page: u32) -> PatientQuery {
        let list = self.list.read().await;
        PatientQuery {
            page: list.pagination.clamp(page),
            per_page: list.pagination.per_page(),
            search: list.search.clone(),
            status: list.status,
        }
    }

    async fn apply_page(&self, query: &PatientQuery, page: &Page<Patient>) {
        let mut list = self.list.write().await;
        // A filter change while this page was in flight makes it obsolete.
        if list.search != query.search || list.status != query.status {
            debug!(?query, "Dropping page for an outdated filter");
            return;
        }
        list.rows = page.data.clone();
        list.pagination.update_from(page);
    }

    async fn fetch(&self, query: PatientQuery) -> ClinicResult<Page<Patient>> {
        let page = self
            .pages
            .get_or_fetch(query.clone(), || self.api.list_patients(&query))
            .await?;
        self.apply_page(&query, &page).await;
        Ok(page)
    }

    /// Loads a page with the current search and status filter.
    pub async fn load(&self, page: u32) -> ClinicResult<Page<Patient>> {
        let query = self.query_for(page).await;
        self.fetch(query).await
    }

    pub async fn next_page(&self) -> ClinicResult<Option<Page<Patient>>> {
        let next = self.list.read().await.pagination.next_page();
        match next {
            Some(page) => self.load(page).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn prev_page(&self) -> ClinicResult<Option<Page<Patient>>> {
        let prev = self.list.read().await.pagination.prev_page();
        match prev {
            Some(page) => self.load(page).await.map(Some),
            None => Ok(None),
        }
    }

    /// Debounced search. Returns `Ok(None)` when a newer keystroke took over
    /// before this one was sent or answered.
    pub async fn search(&self, term: &str) -> ClinicResult<Option<Page<Patient>>> {
        let token = self.searches.begin().await;
        if !self.debouncer.settle().await {
            return Ok(None);
        }

        let term = term.trim();
        let search = (!term.is_empty()).then(|| term.to_string());
        let query = {
            let mut list = self.list.write().await;
            list.search = search;
            list.pagination.go_to(1);
            PatientQuery {
                page: 1,
                per_page: list.pagination.per_page(),
                search: list.search.clone(),
                status: list.status,
            }
        };

        debug!(search = ?query.search, "Searching patients");
        match token.run(self.fetch(query)).await {
            Ok(page) => Ok(Some(page)),
            Err(ClinicError::Cancelled) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Replaces both filters and loads `page` right away, skipping the
    /// debounce. Pending debounced searches are dropped.
    pub async fn load_filtered(
        &self,
        page: u32,
        search: Option<&str>,
        status: Option<PatientStatus>,
    ) -> ClinicResult<Page<Patient>> {
        self.searches.cancel().await;
        {
            let mut list = self.list.write().await;
            list.search = search
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_string);
            list.status = status;
        }
        self.load(page).await
    }

    pub async fn filter_status(&self, status: Option<PatientStatus>) -> ClinicResult<Page<Patient>> {
        {
            let mut list = self.list.write().await;
            list.status = status;
            list.pagination.go_to(1);
        }
        self.load(1).await
    }

    pub async fn rows(&self) -> Vec<Patient> {
        self.list.read().await.rows.clone()
    }

    pub async fn pagination(&self) -> Pagination {
        self.list.read().await.pagination
    }

    pub async fn search_term(&self) -> Option<String> {
        self.list.read().await.search.clone()
    }

    pub async fn get(&self, id: i64) -> ClinicResult<Patient> {
        self.details
            .get_or_fetch(id, || self.api.get_patient(id))
            .await
    }

    pub async fn create(&self, patient: &NewPatient, today: NaiveDate) -> ClinicResult<Patient> {
        patient.validate(today)?;
        let created = self.api.create_patient(patient).await?;
        info!(patient_id = created.id, "Patient created");

        self.invalidate().await;
        self.reload().await;
        Ok(created)
    }

    pub async fn update(&self, id: i64, update: &PatientUpdate, today: NaiveDate) -> ClinicResult<Patient> {
        update.validate(today)?;
        let updated = self.api.update_patient(id, update).await?;
        info!(patient_id = id, "Patient updated");

        self.invalidate().await;
        self.details.insert(id, updated.clone()).await;
        self.reload().await;
        Ok(updated)
    }

    /// Flips a listed patient between active and inactive. The row changes
    /// right away and is restored if the backend refuses.
    pub async fn toggle_status(&self, id: i64) -> ClinicResult<Patient> {
        let previous = {
            let mut list = self.list.write().await;
            let row = list
                .rows
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| ClinicError::NotFound(format!("Patient {id} is not listed")))?;
            let previous = row.status;
            row.status = previous.toggled();
            previous
        };

        let update = PatientUpdate::status(previous.toggled());
        let result = self
            .ledger
            .track("toggle_patient_status", id, self.api.update_patient(id, &update))
            .await;

        let mut list = self.list.write().await;
        match result {
            Ok(patient) => {
                if let Some(row) = list.rows.iter_mut().find(|p| p.id == id) {
                    *row = patient.clone();
                }
                drop(list);
                self.pages.invalidate_all().await;
                self.details.insert(id, patient.clone()).await;
                Ok(patient)
            }
            Err(err) => {
                if let Some(row) = list.rows.iter_mut().find(|p| p.id == id) {
                    row.status = previous;
                }
                warn!(patient_id = id, "Restored patient status after failed toggle");
                Err(err)
            }
        }
    }

    /// Marks cached pages and details stale.
    pub async fn invalidate(&self) {
        self.pages.invalidate_all().await;
        self.details.invalidate_all().await;
    }

    /// Refetches the current page; a failure keeps the rows on screen.
    async fn reload(&self) {
        let page = self.list.read().await.pagination.current_page();
        if let Err(err) = self.load(page).await {
            warn!(error = %err, "Failed to refresh patient list");
        }
    }

    pub fn ledger(&self) -> &MutationLedger {
        &self.ledger
    }
}
