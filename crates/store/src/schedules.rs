//! General and custom schedule lists.
//!
//! The two kinds are paged independently. Deleting or toggling a custom
//! schedule changes the local list first and undoes the change when the
//! backend rejects it.

use std::sync::Arc;

use chrono::NaiveDate;
use clinicdesk_client::ClinicApi;
use clinicdesk_core::errors::{ClinicError, ClinicResult};
use clinicdesk_core::models::{
    pagination::{Page, Pagination},
    schedule::{
        CustomSchedule, CustomScheduleInput, Day, GeneralSchedule, ScheduleWindow,
        effective_schedule,
    },
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::mutation::MutationLedger;

#[derive(Debug, Clone)]
struct ScheduleLists {
    general: Vec<GeneralSchedule>,
    general_pages: Pagination,
    custom: Vec<CustomSchedule>,
    custom_pages: Pagination,
}

pub struct ScheduleStore {
    api: Arc<dyn ClinicApi>,
    lists: RwLock<ScheduleLists>,
    ledger: MutationLedger,
}

impl ScheduleStore {
    pub fn new(api: Arc<dyn ClinicApi>, per_page: u32) -> Self {
        Self {
            api,
            lists: RwLock::new(ScheduleLists {
                general: Vec::new(),
                general_pages: Pagination::new(per_page),
                custom: Vec::new(),
                custom_pages: Pagination::new(per_page),
            }),
            ledger: MutationLedger::new(),
        }
    }

    pub async fn load_general(&self, page: u32) -> ClinicResult<Page<GeneralSchedule>> {
        let (page, per_page) = {
            let lists = self.lists.read().await;
            (lists.general_pages.clamp(page), lists.general_pages.per_page())
        };
        let result = self.api.list_general_schedules(page, per_page).await?;

        let mut lists = self.lists.write().await;
        lists.general = result.data.clone();
        lists.general_pages.update_from(&result);
        Ok(result)
    }

    pub async fn load_custom(&self, page: u32) -> ClinicResult<Page<CustomSchedule>> {
        let (page, per_page) = {
            let lists = self.lists.read().await;
            (lists.custom_pages.clamp(page), lists.custom_pages.per_page())
        };
        let result = self.api.list_custom_schedules(page, per_page).await?;

        let mut lists = self.lists.write().await;
        lists.custom = result.data.clone();
        lists.custom_pages.update_from(&result);
        Ok(result)
    }

    pub async fn general(&self) -> Vec<GeneralSchedule> {
        self.lists.read().await.general.clone()
    }

    pub async fn custom(&self) -> Vec<CustomSchedule> {
        self.lists.read().await.custom.clone()
    }

    pub async fn general_pagination(&self) -> Pagination {
        self.lists.read().await.general_pages
    }

    pub async fn custom_pagination(&self) -> Pagination {
        self.lists.read().await.custom_pages
    }

    /// Window that applies to `date` according to the loaded lists.
    /// Display only; the backend decides what is bookable.
    pub async fn effective_window(&self, date: NaiveDate) -> Option<ScheduleWindow> {
        let lists = self.lists.read().await;
        effective_schedule(date, &lists.general, &lists.custom)
            .filter(|schedule| schedule.is_open())
            .map(|schedule| schedule.window())
    }

    pub async fn update_general(&self, day: Day, window: &ScheduleWindow) -> ClinicResult<GeneralSchedule> {
        window.validate()?;
        let updated = self.api.update_general_schedule(day, window).await?;
        info!(%day, "General schedule updated");

        let mut lists = self.lists.write().await;
        match lists.general.iter_mut().find(|s| s.day == day) {
            Some(existing) => *existing = updated.clone(),
            None => lists.general.push(updated.clone()),
        }
        Ok(updated)
    }

    /// Creates a custom schedule and reloads the current custom page.
    pub async fn create_custom(&self, input: &CustomScheduleInput, today: NaiveDate) -> ClinicResult<CustomSchedule> {
        input.validate(today)?;
        let created = self.api.create_custom_schedule(input).await?;
        info!(schedule_id = created.id, date = %created.scheduled_date, "Custom schedule created");

        let current = self.lists.read().await.custom_pages.current_page();
        if let Err(err) = self.load_custom(current).await {
            warn!(error = %err, "Failed to refresh custom schedules");
        }
        Ok(created)
    }

    pub async fn update_custom(
        &self,
        id: i64,
        input: &CustomScheduleInput,
        today: NaiveDate,
    ) -> ClinicResult<CustomSchedule> {
        input.validate(today)?;
        let updated = self.api.update_custom_schedule(id, input).await?;
        info!(schedule_id = id, "Custom schedule updated");

        let mut lists = self.lists.write().await;
        if let Some(existing) = lists.custom.iter_mut().find(|s| s.id == id) {
            *existing = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete_custom(&self, id: i64) -> ClinicResult<()> {
        let (index, removed) = {
            let mut lists = self.lists.write().await;
            let index = lists
                .custom
                .iter()
                .position(|s| s.id == id)
                .ok_or_else(|| ClinicError::NotFound(format!("Custom schedule {id} is not listed")))?;
            let removed = lists.custom.remove(index);
            lists.custom_pages.adjust_count(-1);
            (index, removed)
        };

        let result = self
            .ledger
            .track("delete_custom_schedule", id, self.api.delete_custom_schedule(id))
            .await;

        if let Err(err) = result {
            let mut lists = self.lists.write().await;
            let index = index.min(lists.custom.len());
            lists.custom.insert(index, removed);
            lists.custom_pages.adjust_count(1);
            warn!(schedule_id = id, "Restored custom schedule after failed delete");
            return Err(err);
        }
        Ok(())
    }

    pub async fn toggle_custom(&self, id: i64) -> ClinicResult<CustomSchedule> {
        let previous = {
            let mut lists = self.lists.write().await;
            let schedule = lists
                .custom
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| ClinicError::NotFound(format!("Custom schedule {id} is not listed")))?;
            let previous = schedule.status;
            schedule.status = !previous;
            previous
        };

        let result = self
            .ledger
            .track(
                "toggle_custom_schedule",
                id,
                self.api.set_custom_schedule_status(id, !previous),
            )
            .await;

        let mut lists = self.lists.write().await;
        let row = lists.custom.iter_mut().find(|s| s.id == id);
        match (result, row) {
            (Ok(updated), Some(row)) => {
                *row = updated.clone();
                Ok(updated)
            }
            (Ok(updated), None) => Ok(updated),
            (Err(err), Some(row)) => {
                row.status = previous;
                warn!(schedule_id = id, "Restored custom schedule status after failed toggle");
                Err(err)
            }
            (Err(err), None) => Err(err),
        }
    }

    pub fn ledger(&self) -> &MutationLedger {
        &self.ledger
    }
}
