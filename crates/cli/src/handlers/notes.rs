use clinicdesk_core::errors::ClinicResult;
use clinicdesk_core::models::prescription::NoteInput;

use crate::commands::notes::NotesCommand;
use crate::handlers::Handler;
use crate::render;

pub async fn handle_notes_command(ctx: &Handler<'_>, command: NotesCommand) -> ClinicResult<String> {
    let notes = &ctx.stores().prescriptions;
    match command {
        NotesCommand::List { appointment_id } => {
            let loaded = notes.load(appointment_id).await?;
            Ok(render::notes(&loaded))
        }
        NotesCommand::Add {
            appointment_id,
            key,
            value,
        } => {
            let note = notes.create(appointment_id, &NoteInput::new(key, value)).await?;
            Ok(format!("Added note #{}: {}", note.id, note.key))
        }
        NotesCommand::Edit {
            appointment_id,
            note_id,
            key,
            value,
        } => {
            let note = notes
                .update(appointment_id, note_id, &NoteInput::new(key, value))
                .await?;
            Ok(format!("Updated note #{}: {}", note.id, note.key))
        }
        NotesCommand::Delete {
            appointment_id,
            note_id,
        } => {
            notes.load(appointment_id).await?;
            notes.delete(appointment_id, note_id).await?;
            Ok(format!("Deleted note #{note_id}"))
        }
    }
}
