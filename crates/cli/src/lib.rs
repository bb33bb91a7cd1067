use chrono::NaiveDate;
use clinicdesk_core::errors::ClinicResult;
use clinicdesk_store::Stores;

pub mod commands;
pub mod handlers;
pub mod render;

pub use commands::Cli;

/// Runs one command line invocation and returns the text to print.
///
/// # Arguments
///
/// * `cli` - The parsed command line
/// * `stores` - Stores wired to a connected API client
/// * `today` - The local date, used to reject schedules and birth dates on
///   the wrong side of today
pub async fn run(cli: Cli, stores: &Stores, today: NaiveDate) -> ClinicResult<String> {
    handlers::Handler::new(stores, today)
        .handle(cli.command)
        .await
}
