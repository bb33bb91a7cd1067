use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use clinicdesk_core::models::appointment::{AppointmentStatus, AppointmentTab};

#[derive(Debug, Subcommand)]
pub enum AppointmentsCommand {
    /// One dashboard tab
    List {
        #[arg(short, long, value_enum, default_value_t = TabArg::Today)]
        tab: TabArg,

        #[arg(short, long, default_value_t = 1)]
        page: u32,

        #[arg(short, long)]
        search: Option<String>,
    },

    /// Full details of an appointment
    Show { id: i64 },

    /// Cancel an upcoming appointment
    Cancel { id: i64 },

    /// Record what happened to an appointment
    Status {
        id: i64,

        #[arg(value_enum)]
        status: StatusArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    Today,
    Future,
    Past,
}

impl From<TabArg> for AppointmentTab {
    fn from(arg: TabArg) -> Self {
        match arg {
            TabArg::Today => AppointmentTab::Today,
            TabArg::Future => AppointmentTab::Future,
            TabArg::Past => AppointmentTab::Past,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Upcoming,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl From<StatusArg> for AppointmentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Upcoming => AppointmentStatus::Upcoming,
            StatusArg::InProgress => AppointmentStatus::InProgress,
            StatusArg::Completed => AppointmentStatus::Completed,
            StatusArg::Cancelled => AppointmentStatus::Cancelled,
            StatusArg::NoShow => AppointmentStatus::NoShow,
        }
    }
}

/// Patient and date whose open slots are looked up.
#[derive(Debug, Args)]
pub struct SlotsArgs {
    pub patient_id: i64,

    /// YYYY-MM-DD
    pub date: NaiveDate,

    /// The patient has completed registration
    #[arg(long)]
    pub registered: bool,
}

#[derive(Debug, Args)]
pub struct BookArgs {
    #[command(flatten)]
    pub lookup: SlotsArgs,

    /// Slot label as listed by `slots`, e.g. "09:00 - 09:30"
    pub slot: String,

    #[arg(long)]
    pub reason: Option<String>,
}

#[derive(Debug, Args)]
pub struct RescheduleArgs {
    pub booked_slot_id: i64,

    #[command(flatten)]
    pub lookup: SlotsArgs,

    /// Slot label as listed by `slots`
    pub slot: String,
}
