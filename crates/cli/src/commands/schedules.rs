use chrono::NaiveDate;
use clap::{Args, Subcommand};
use clinicdesk_core::models::schedule::{CustomScheduleInput, Day, ScheduleWindow};

#[derive(Debug, Subcommand)]
pub enum SchedulesCommand {
    /// Weekly templates
    General {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Dated overrides
    Custom {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Replace the weekly template of a day
    SetDay {
        /// Day name, e.g. monday or mon
        day: Day,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Add an override for a date
    Add {
        date: NaiveDate,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Change an existing override
    Edit {
        id: i64,

        date: NaiveDate,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Open or close an override
    Toggle {
        id: i64,

        /// Custom list page the schedule is on
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Remove an override
    Delete {
        id: i64,

        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
}

#[derive(Debug, Args)]
pub struct WindowArgs {
    /// HH:MM
    #[arg(long)]
    pub start: String,

    /// HH:MM
    #[arg(long)]
    pub end: String,

    /// Slot length in minutes
    #[arg(long, default_value_t = 30)]
    pub duration: u32,

    /// Mark the window as closed
    #[arg(long)]
    pub closed: bool,
}

impl From<WindowArgs> for ScheduleWindow {
    fn from(args: WindowArgs) -> Self {
        Self {
            start_time: args.start,
            end_time: args.end,
            status: !args.closed,
            duration: args.duration,
        }
    }
}

pub fn custom_input(date: NaiveDate, window: WindowArgs) -> CustomScheduleInput {
    CustomScheduleInput {
        scheduled_date: date,
        window: window.into(),
    }
}
