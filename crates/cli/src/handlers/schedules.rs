use clinicdesk_core::errors::ClinicResult;

use crate::commands::schedules::{SchedulesCommand, custom_input};
use crate::handlers::Handler;
use crate::render;

pub async fn handle_schedules_command(ctx: &Handler<'_>, command: SchedulesCommand) -> ClinicResult<String> {
    let schedules = &ctx.stores().schedules;
    match command {
        SchedulesCommand::General { page } => {
            let page = schedules.load_general(page).await?;
            Ok(render::general_schedules(&page))
        }
        SchedulesCommand::Custom { page } => {
            let page = schedules.load_custom(page).await?;
            Ok(render::custom_schedules(&page))
        }
        SchedulesCommand::SetDay { day, window } => {
            let schedule = schedules.update_general(day, &window.into()).await?;
            Ok(format!(
                "{} is now {} - {}",
                schedule.day, schedule.start_time, schedule.end_time
            ))
        }
        SchedulesCommand::Add { date, window } => {
            let schedule = schedules
                .create_custom(&custom_input(date, window), ctx.today())
                .await?;
            Ok(format!("Added schedule #{} for {}", schedule.id, schedule.scheduled_date))
        }
        SchedulesCommand::Edit { id, date, window } => {
            let schedule = schedules
                .update_custom(id, &custom_input(date, window), ctx.today())
                .await?;
            Ok(format!("Updated schedule #{} for {}", schedule.id, schedule.scheduled_date))
        }
        SchedulesCommand::Toggle { id, page } => {
            schedules.load_custom(page).await?;
            let schedule = schedules.toggle_custom(id).await?;
            Ok(format!(
                "Schedule #{} is now {}",
                schedule.id,
                if schedule.status { "open" } else { "closed" }
            ))
        }
        SchedulesCommand::Delete { id, page } => {
            schedules.load_custom(page).await?;
            schedules.delete_custom(id).await?;
            Ok(format!("Deleted schedule #{id}"))
        }
    }
}
