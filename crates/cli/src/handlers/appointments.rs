use clinicdesk_core::errors::ClinicResult;

use crate::commands::appointments::{AppointmentsCommand, BookArgs, RescheduleArgs, SlotsArgs};
use crate::handlers::Handler;
use crate::render;

pub async fn handle_appointments_command(
    ctx: &Handler<'_>,
    command: AppointmentsCommand,
) -> ClinicResult<String> {
    let appointments = &ctx.stores().appointments;
    match command {
        AppointmentsCommand::List { tab, page, search } => {
            let page = appointments.tab(tab.into(), page, search).await?;
            Ok(render::appointment_page(&page))
        }
        AppointmentsCommand::Show { id } => {
            let appointment = appointments.detail(id).await?;
            Ok(render::appointment(&appointment))
        }
        AppointmentsCommand::Cancel { id } => {
            // Loads the detail so a closed appointment is refused locally.
            appointments.detail(id).await?;
            let appointment = appointments.cancel(id).await?;
            Ok(format!("Appointment #{} is {}", appointment.id, appointment.derived_status()))
        }
        AppointmentsCommand::Status { id, status } => {
            let appointment = appointments.update_status(id, status.into()).await?;
            Ok(format!("Appointment #{} is {}", appointment.id, appointment.derived_status()))
        }
    }
}

pub async fn handle_slots(ctx: &Handler<'_>, args: SlotsArgs) -> ClinicResult<String> {
    let picker = ctx.stores().slot_picker(args.patient_id, args.registered);
    let slots = picker.select_date(args.date).await?;
    Ok(render::slots(args.date, &slots))
}

pub async fn handle_book(ctx: &Handler<'_>, args: BookArgs) -> ClinicResult<String> {
    let lookup = args.lookup;
    let picker = ctx.stores().slot_picker(lookup.patient_id, lookup.registered);
    picker.select_date(lookup.date).await?;
    picker.select_slot(&args.slot).await?;

    let appointment = ctx.stores().booking.book(&picker, args.reason).await?;
    Ok(format!(
        "Booked appointment #{} for {} on {} at {}",
        appointment.id,
        appointment.patient.full_name(),
        lookup.date,
        args.slot
    ))
}

pub async fn handle_reschedule(ctx: &Handler<'_>, args: RescheduleArgs) -> ClinicResult<String> {
    let lookup = args.lookup;
    let picker = ctx.stores().slot_picker(lookup.patient_id, lookup.registered);
    picker.select_date(lookup.date).await?;
    picker.select_slot(&args.slot).await?;

    let booked = ctx
        .stores()
        .reschedule
        .submit_selection(args.booked_slot_id, &picker)
        .await?;
    Ok(format!("Rescheduled to {}", booked.label()))
}
