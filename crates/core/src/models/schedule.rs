use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{ClinicError, ClinicResult};
use crate::validation::FieldErrors;

/// Day name used to key general schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Day::ALL[date.weekday().num_days_from_monday() as usize]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Day {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| day.as_str() == lowered || day.as_str()[..3] == lowered)
            .ok_or_else(|| ClinicError::Validation(format!("Unknown day: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleKind {
    General,
    Custom,
}

impl ScheduleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleKind::General => "general",
            ScheduleKind::Custom => "custom",
        }
    }
}

/// Parses `HH:MM` or `HH:MM:SS`.
pub fn parse_time(value: &str) -> ClinicResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| ClinicError::Validation(format!("Invalid time: {value}")))
}

/// Time range plus status and slot duration, shared by both schedule kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub start_time: String,
    pub end_time: String,
    pub status: bool,
    /// Slot length in minutes.
    pub duration: u32,
}

impl ScheduleWindow {
    pub fn validate(&self) -> ClinicResult<()> {
        let mut errors = FieldErrors::new();
        let start = parse_time(&self.start_time);
        let end = parse_time(&self.end_time);
        if start.is_err() {
            errors.add("start_time", "is invalid");
        }
        if end.is_err() {
            errors.add("end_time", "is invalid");
        }
        if self.duration == 0 {
            errors.add("duration", "must be greater than 0");
        }
        if let (Ok(start), Ok(end)) = (start, end) {
            if start >= end {
                errors.add("end_time", "must be after start time");
            } else if self.duration > 0 {
                let minutes = (end - start).num_minutes();
                if minutes % i64::from(self.duration) != 0 {
                    errors.add("duration", "must divide the time range evenly");
                }
            }
        }
        errors.into_result()
    }

    /// Consecutive `(start, end)` pairs of `duration` minutes covering the window.
    pub fn slot_times(&self) -> ClinicResult<Vec<(NaiveTime, NaiveTime)>> {
        self.validate()?;
        let start = parse_time(&self.start_time)?;
        let end = parse_time(&self.end_time)?;
        let step = chrono::Duration::minutes(i64::from(self.duration));

        let mut slots = Vec::new();
        let mut cursor = start;
        while cursor < end {
            let next = cursor + step;
            slots.push((cursor, next));
            cursor = next;
        }
        Ok(slots)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSchedule {
    pub id: i64,
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    pub status: bool,
    pub duration: u32,
}

impl GeneralSchedule {
    pub fn window(&self) -> ScheduleWindow {
        ScheduleWindow {
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            status: self.status,
            duration: self.duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSchedule {
    pub id: i64,
    pub scheduled_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: bool,
    pub duration: u32,
}

impl CustomSchedule {
    pub fn window(&self) -> ScheduleWindow {
        ScheduleWindow {
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            status: self.status,
            duration: self.duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomScheduleInput {
    pub scheduled_date: NaiveDate,
    #[serde(flatten)]
    pub window: ScheduleWindow,
}

impl CustomScheduleInput {
    pub fn validate(&self, today: NaiveDate) -> ClinicResult<()> {
        self.window.validate()?;
        if self.scheduled_date < today {
            let mut errors = FieldErrors::new();
            errors.add("scheduled_date", "can't be in the past");
            return errors.into_result();
        }
        Ok(())
    }
}

/// The schedule that governs a date: a custom override when one exists for
/// that date, otherwise the general template for its weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveSchedule<'a> {
    Custom(&'a CustomSchedule),
    General(&'a GeneralSchedule),
}

impl EffectiveSchedule<'_> {
    pub fn is_open(&self) -> bool {
        match self {
            EffectiveSchedule::Custom(s) => s.status,
            EffectiveSchedule::General(s) => s.status,
        }
    }

    pub fn window(&self) -> ScheduleWindow {
        match self {
            EffectiveSchedule::Custom(s) => s.window(),
            EffectiveSchedule::General(s) => s.window(),
        }
    }
}

pub fn effective_schedule<'a>(
    date: NaiveDate,
    general: &'a [GeneralSchedule],
    custom: &'a [CustomSchedule],
) -> Option<EffectiveSchedule<'a>> {
    if let Some(schedule) = custom.iter().find(|s| s.scheduled_date == date) {
        return Some(EffectiveSchedule::Custom(schedule));
    }
    let day = Day::of(date);
    general
        .iter()
        .find(|s| s.day == day)
        .map(EffectiveSchedule::General)
}
