use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{ClinicError, ClinicResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> ClinicResult<Self> {
        if from > to {
            return Err(ClinicError::Validation(format!(
                "Start date {from} is after end date {to}"
            )));
        }
        Ok(Self { from, to })
    }

    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    #[serde(default)]
    pub upcoming: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub cancelled: u64,
    #[serde(default)]
    pub no_show: u64,
    #[serde(default)]
    pub in_progress: u64,
}

impl StatusBreakdown {
    pub fn total(&self) -> u64 {
        self.upcoming + self.completed + self.cancelled + self.no_show + self.in_progress
    }

    /// Share of finished appointments that were completed, in percent.
    pub fn completion_rate(&self) -> Option<f64> {
        let finished = self.completed + self.cancelled + self.no_show;
        (finished > 0).then(|| self.completed as f64 * 100.0 / finished as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    #[serde(default)]
    pub appointments: Vec<TrendPoint>,
    #[serde(default)]
    pub new_patients: Vec<TrendPoint>,
    #[serde(default)]
    pub status_breakdown: StatusBreakdown,
}
