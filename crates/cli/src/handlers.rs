use chrono::NaiveDate;
use clinicdesk_core::errors::ClinicResult;
use clinicdesk_store::Stores;
use tracing::debug;

pub mod appointments;
pub mod notes;
pub mod patients;
pub mod schedules;

use crate::commands::Command;
use crate::render;

/// Runs parsed commands against the stores.
///
/// Every handler returns the text to print. `today` anchors the date
/// validation of new patients and schedules.
pub struct Handler<'a> {
    stores: &'a Stores,
    today: NaiveDate,
}

impl<'a> Handler<'a> {
    pub fn new(stores: &'a Stores, today: NaiveDate) -> Self {
        Self { stores, today }
    }

    pub fn stores(&self) -> &'a Stores {
        self.stores
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub async fn handle(&self, command: Command) -> ClinicResult<String> {
        debug!(?command, "Handling command");
        match command {
            Command::Patients(command) => patients::handle_patients_command(self, command).await,
            Command::Appointments(command) => {
                appointments::handle_appointments_command(self, command).await
            }
            Command::Overview => {
                let overview = self.stores.appointments.overview().await?;
                Ok(render::overview(&overview))
            }
            Command::Slots(args) => appointments::handle_slots(self, args).await,
            Command::Book(args) => appointments::handle_book(self, args).await,
            Command::Reschedule(args) => appointments::handle_reschedule(self, args).await,
            Command::Schedules(command) => schedules::handle_schedules_command(self, command).await,
            Command::Notes(command) => notes::handle_notes_command(self, command).await,
            Command::Analytics { from, to } => {
                let report = self.stores.analytics.report(from, to).await?;
                Ok(render::analytics(from, to, &report))
            }
            Command::Whoami => Ok(match self.stores.auth.current_user().await {
                Some(user) => format!(
                    "Signed in as {} ({})",
                    user.name.as_deref().unwrap_or(&user.email),
                    user.role.as_deref().unwrap_or("staff")
                ),
                None => "Not signed in".to_string(),
            }),
            Command::Logout => {
                self.stores.auth.logout().await?;
                Ok("Signed out".to_string())
            }
        }
    }
}
