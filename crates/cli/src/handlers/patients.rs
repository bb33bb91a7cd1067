use clinicdesk_core::errors::ClinicResult;

use crate::commands::patients::PatientsCommand;
use crate::handlers::Handler;
use crate::render;

pub async fn handle_patients_command(ctx: &Handler<'_>, command: PatientsCommand) -> ClinicResult<String> {
    let patients = &ctx.stores().patients;
    match command {
        PatientsCommand::List { page, search, status } => {
            let page = patients
                .load_filtered(page, search.as_deref(), status.map(Into::into))
                .await?;
            Ok(render::patient_page(&page))
        }
        PatientsCommand::Show { id } => {
            let patient = patients.get(id).await?;
            Ok(render::patient(&patient))
        }
        PatientsCommand::Create(args) => {
            let patient = patients.create(&args.into(), ctx.today()).await?;
            Ok(format!("Registered {} (#{})", patient.full_name(), patient.id))
        }
        PatientsCommand::Update { id, fields } => {
            let patient = patients.update(id, &fields.into(), ctx.today()).await?;
            Ok(format!("Updated {} (#{})", patient.full_name(), patient.id))
        }
        PatientsCommand::Toggle { id, page } => {
            patients.load(page).await?;
            let patient = patients.toggle_status(id).await?;
            Ok(format!(
                "{} is now {}",
                patient.full_name(),
                patient.status.as_str()
            ))
        }
        PatientsCommand::History { id } => {
            let history = ctx.stores().appointments.patient_history(id).await?;
            Ok(render::appointment_list(&history))
        }
    }
}
