use std::sync::Arc;

use chrono::NaiveDate;
use clinicdesk_client::ClinicApi;
use clinicdesk_core::errors::ClinicResult;
use clinicdesk_core::models::analytics::{Analytics, DateRange};

use crate::cache::QueryCache;

pub struct AnalyticsStore {
    api: Arc<dyn ClinicApi>,
    reports: QueryCache<DateRange, Analytics>,
}

impl AnalyticsStore {
    pub fn new(api: Arc<dyn ClinicApi>) -> Self {
        Self {
            api,
            reports: QueryCache::new("analytics"),
        }
    }

    /// Trend series and status counts for `from..=to`. An inverted range is
    /// rejected before any request goes out.
    pub async fn report(&self, from: NaiveDate, to: NaiveDate) -> ClinicResult<Analytics> {
        let range = DateRange::new(from, to)?;
        self.reports
            .get_or_fetch(range, || self.api.analytics(&range))
            .await
    }

    pub async fn invalidate(&self) {
        self.reports.invalidate_all().await;
    }

    pub async fn is_stale(&self, from: NaiveDate, to: NaiveDate) -> bool {
        match DateRange::new(from, to) {
            Ok(range) => self.reports.is_stale(&range).await,
            Err(_) => true,
        }
    }
}
