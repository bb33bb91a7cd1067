//! Plain-text views printed by the command handlers.

use chrono::NaiveDate;
use clinicdesk_core::models::{
    analytics::Analytics,
    appointment::{Appointment, Overview},
    availability::AvailableSlot,
    pagination::Page,
    patient::Patient,
    prescription::PrescriptionNote,
    schedule::{CustomSchedule, GeneralSchedule},
};

fn footer<T>(page: &Page<T>) -> String {
    format!(
        "Page {} of {} ({} total)",
        page.current_page,
        page.total_pages.max(1),
        page.total_count
    )
}

fn open_or_closed(status: bool) -> &'static str {
    if status { "open" } else { "closed" }
}

pub fn patient_page(page: &Page<Patient>) -> String {
    if page.data.is_empty() {
        return "No patients found".to_string();
    }
    let mut out = String::new();
    for patient in &page.data {
        out.push_str(&format!(
            "#{:<5} {:<28} {:<30} {:<16} {}\n",
            patient.id,
            patient.full_name(),
            patient.email,
            patient.phone,
            patient.status.as_str()
        ));
    }
    out.push_str(&footer(page));
    out
}

pub fn patient(patient: &Patient) -> String {
    let mut out = format!("{} (#{})\n", patient.full_name(), patient.id);
    out.push_str(&format!("Email:   {}\n", patient.email));
    out.push_str(&format!("Phone:   {}\n", patient.phone));
    if let Some(dob) = patient.date_of_birth {
        out.push_str(&format!("Born:    {dob}\n"));
    }
    if let Some(gender) = &patient.gender {
        out.push_str(&format!("Gender:  {gender}\n"));
    }
    if let Some(address) = &patient.address {
        out.push_str(&format!("Address: {address}\n"));
    }
    out.push_str(&format!("Status:  {}", patient.status.as_str()));
    out
}

fn appointment_row(appointment: &Appointment) -> String {
    let when = appointment
        .booked_slot
        .as_ref()
        .map(|slot| slot.label())
        .unwrap_or_else(|| "unscheduled".to_string());
    format!(
        "#{:<5} {:<28} {:<28} {}",
        appointment.id,
        appointment.patient.full_name(),
        when,
        appointment.derived_status()
    )
}

pub fn appointment_list(appointments: &[Appointment]) -> String {
    if appointments.is_empty() {
        return "No appointments".to_string();
    }
    appointments
        .iter()
        .map(appointment_row)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn appointment_page(page: &Page<Appointment>) -> String {
    if page.data.is_empty() {
        return "No appointments".to_string();
    }
    format!("{}\n{}", appointment_list(&page.data), footer(page))
}

pub fn appointment(appointment: &Appointment) -> String {
    let mut out = format!(
        "Appointment #{} for {} (patient #{})\n",
        appointment.id,
        appointment.patient.full_name(),
        appointment.patient.id
    );
    out.push_str(&format!("Status: {}\n", appointment.derived_status()));
    match &appointment.booked_slot {
        Some(slot) => out.push_str(&format!("Slot:   {} (booked slot #{})\n", slot.label(), slot.id)),
        None => out.push_str("Slot:   unscheduled\n"),
    }
    if let Some(reason) = &appointment.reason {
        out.push_str(&format!("Reason: {reason}\n"));
    }
    if !appointment.treatment_history.is_empty() {
        out.push_str("Treatment history:\n");
        for record in &appointment.treatment_history {
            out.push_str(&format!(
                "  {} {}\n",
                record.date,
                record.treatment.as_deref().unwrap_or("-")
            ));
        }
    }
    if !appointment.attachments.is_empty() {
        out.push_str(&format!("Attachments: {}\n", appointment.attachments.len()));
    }
    out.trim_end().to_string()
}

pub fn overview(overview: &Overview) -> String {
    format!(
        "Today: {}  Upcoming: {}  Completed: {}  Cancelled: {}  No show: {}  Patients: {}",
        overview.today,
        overview.upcoming,
        overview.completed,
        overview.cancelled,
        overview.no_show,
        overview.total_patients
    )
}

pub fn slots(date: NaiveDate, slots: &[AvailableSlot]) -> String {
    if slots.is_empty() {
        return format!("No slots on {date}");
    }
    let mut out = format!("Slots on {date}:\n");
    for slot in slots {
        let marker = if slot.available { "open" } else { "taken" };
        out.push_str(&format!("  {:<16} {marker}\n", slot.time));
    }
    out.trim_end().to_string()
}

pub fn general_schedules(page: &Page<GeneralSchedule>) -> String {
    let mut out = String::new();
    for schedule in &page.data {
        out.push_str(&format!(
            "{:<10} {} - {}  every {} min  {}\n",
            schedule.day,
            schedule.start_time,
            schedule.end_time,
            schedule.duration,
            open_or_closed(schedule.status)
        ));
    }
    out.push_str(&footer(page));
    out
}

pub fn custom_schedules(page: &Page<CustomSchedule>) -> String {
    let mut out = String::new();
    for schedule in &page.data {
        out.push_str(&format!(
            "#{:<5} {}  {} - {}  every {} min  {}\n",
            schedule.id,
            schedule.scheduled_date,
            schedule.start_time,
            schedule.end_time,
            schedule.duration,
            open_or_closed(schedule.status)
        ));
    }
    out.push_str(&footer(page));
    out
}

pub fn notes(notes: &[PrescriptionNote]) -> String {
    if notes.is_empty() {
        return "No prescription notes".to_string();
    }
    notes
        .iter()
        .map(|note| format!("#{:<5} {}: {}", note.id, note.key, note.value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn analytics(from: NaiveDate, to: NaiveDate, report: &Analytics) -> String {
    let appointments: u64 = report.appointments.iter().map(|p| p.count).sum();
    let new_patients: u64 = report.new_patients.iter().map(|p| p.count).sum();
    let breakdown = &report.status_breakdown;

    let mut out = format!("{from} to {to}\n");
    out.push_str(&format!("Appointments: {appointments}\n"));
    out.push_str(&format!("New patients: {new_patients}\n"));
    out.push_str(&format!(
        "Completed {}, cancelled {}, no show {}, upcoming {}, in progress {}\n",
        breakdown.completed,
        breakdown.cancelled,
        breakdown.no_show,
        breakdown.upcoming,
        breakdown.in_progress
    ));
    match breakdown.completion_rate() {
        Some(rate) => out.push_str(&format!("Completion rate: {rate:.1}%")),
        None => out.push_str("Completion rate: n/a"),
    }
    out
}
