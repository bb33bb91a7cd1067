use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum NotesCommand {
    /// Notes of an appointment
    List { appointment_id: i64 },

    /// Add a note, e.g. `notes add 31 Amoxicillin "500mg twice daily"`
    Add {
        appointment_id: i64,
        key: String,
        value: String,
    },

    Edit {
        appointment_id: i64,
        note_id: i64,
        key: String,
        value: String,
    },

    Delete { appointment_id: i64, note_id: i64 },
}
