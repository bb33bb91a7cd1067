use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    pub id: i64,
    #[serde(default)]
    pub schedule_id: Option<i64>,
    #[serde(default)]
    pub consultation_id: Option<i64>,
    pub slot_date: NaiveDate,
    pub slot_time: String,
    /// Raw booking status as sent by the backend.
    #[serde(default)]
    pub status: Option<String>,
}

impl BookedSlot {
    pub fn label(&self) -> String {
        format!("{} {}", self.slot_date.format("%Y-%m-%d"), self.slot_time)
    }
}

/// Body of `PUT /api/v1/admin/booked_slots/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleRequest {
    pub booked_slot: RescheduleFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleFields {
    pub slot_date: NaiveDate,
    pub slot_time: String,
}

impl RescheduleRequest {
    pub fn new(slot_date: NaiveDate, slot_time: impl Into<String>) -> Self {
        Self {
            booked_slot: RescheduleFields {
                slot_date,
                slot_time: slot_time.into(),
            },
        }
    }
}
