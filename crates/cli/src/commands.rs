use clap::{Parser, Subcommand};

pub mod appointments;
pub mod notes;
pub mod patients;
pub mod schedules;

use appointments::{AppointmentsCommand, BookArgs, RescheduleArgs, SlotsArgs};
use notes::NotesCommand;
use patients::PatientsCommand;
use schedules::SchedulesCommand;

/// Front office client for the clinic backend.
#[derive(Debug, Parser)]
#[command(name = "clinicdesk")]
#[command(version)]
#[command(about = "Manage patients, schedules and appointments", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register, search and update patients
    #[command(subcommand)]
    Patients(PatientsCommand),

    /// Dashboard tabs and single appointments
    #[command(subcommand)]
    Appointments(AppointmentsCommand),

    /// Global appointment counters
    Overview,

    /// Open slots for a patient on a date
    Slots(SlotsArgs),

    /// Book a consultation on an open slot
    Book(BookArgs),

    /// Move a booked slot to another date and time
    Reschedule(RescheduleArgs),

    /// General (weekly) and custom (dated) schedules
    #[command(subcommand)]
    Schedules(SchedulesCommand),

    /// Prescription notes of an appointment
    #[command(subcommand)]
    Notes(NotesCommand),

    /// Appointment trends and status breakdown for a date range
    Analytics {
        /// First day, YYYY-MM-DD
        #[arg(long)]
        from: chrono::NaiveDate,

        /// Last day, YYYY-MM-DD
        #[arg(long)]
        to: chrono::NaiveDate,
    },

    /// Show the signed-in staff member
    Whoami,

    /// End the session on the backend
    Logout,
}
