use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Open window as returned by the availability endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSlotWindow {
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub schedule_id: Option<i64>,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub available_slots: Vec<RawSlotWindow>,
}

/// Selectable slot. `id` and `time` are both the `"<start> - <end>"` label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub id: String,
    pub time: String,
    pub available: bool,
    pub schedule_id: Option<i64>,
}

impl AvailableSlot {
    pub fn label(start: &str, end: &str) -> String {
        format!("{} - {}", start.trim(), end.trim())
    }
}

impl From<RawSlotWindow> for AvailableSlot {
    fn from(window: RawSlotWindow) -> Self {
        let label = AvailableSlot::label(&window.start_time, &window.end_time);
        Self {
            id: label.clone(),
            time: label,
            available: window.available,
            schedule_id: window.schedule_id,
        }
    }
}

pub fn normalize_slots(response: AvailabilityResponse) -> Vec<AvailableSlot> {
    response
        .available_slots
        .into_iter()
        .map(AvailableSlot::from)
        .collect()
}

/// Parameters of the availability lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub patient_id: i64,
    pub date: NaiveDate,
    /// Whether the patient has completed registration.
    pub registered: bool,
}
