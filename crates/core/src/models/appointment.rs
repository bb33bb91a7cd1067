use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::booked_slot::BookedSlot;
use super::patient::PatientSummary;

/// Status shown to staff, derived from the backend's raw status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
    NoShow,
    InProgress,
}

impl AppointmentStatus {
    /// Case, spacing and separator insensitive; unrecognised values are
    /// treated as still to come.
    pub fn from_raw(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "completed" | "complete" | "done" => AppointmentStatus::Completed,
            "cancelled" | "canceled" => AppointmentStatus::Cancelled,
            "noshow" | "missed" => AppointmentStatus::NoShow,
            "inprogress" | "ongoing" | "started" | "checkedin" => AppointmentStatus::InProgress,
            "booked" | "confirmed" | "scheduled" | "pending" | "upcoming" | "rescheduled" => {
                AppointmentStatus::Upcoming
            }
            other => {
                debug!("Unrecognised appointment status {:?}, treating as upcoming", other);
                AppointmentStatus::Upcoming
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AppointmentStatus::Upcoming => "Upcoming",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::NoShow => "No Show",
            AppointmentStatus::InProgress => "InProgress",
        }
    }

    /// Whether the slot can still be moved or cancelled.
    pub fn is_open(self) -> bool {
        matches!(self, AppointmentStatus::Upcoming)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Attachment metadata only; upload and download are handled elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    pub file_name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient: PatientSummary,
    #[serde(default)]
    pub booked_slot: Option<BookedSlot>,
    /// Raw status string; see [`Appointment::derived_status`].
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub treatment_history: Vec<TreatmentRecord>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Appointment {
    pub fn derived_status(&self) -> AppointmentStatus {
        AppointmentStatus::from_raw(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentTab {
    Today,
    Future,
    Past,
}

impl AppointmentTab {
    pub const ALL: [AppointmentTab; 3] = [
        AppointmentTab::Today,
        AppointmentTab::Future,
        AppointmentTab::Past,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentTab::Today => "today",
            AppointmentTab::Future => "future",
            AppointmentTab::Past => "past",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppointmentQuery {
    pub tab: AppointmentTab,
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Body of `POST /api/v1/admin/consultations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConsultation {
    pub patient_id: i64,
    pub schedule_id: Option<i64>,
    pub slot_date: NaiveDate,
    pub slot_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: String,
}

/// Global dashboard counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub today: u64,
    pub upcoming: u64,
    pub completed: u64,
    pub cancelled: u64,
    #[serde(default)]
    pub no_show: u64,
    #[serde(default)]
    pub total_patients: u64,
}
