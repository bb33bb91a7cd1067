use clap::Parser;
use clinicdesk_cli::Cli;
use clinicdesk_client::config::ClientConfig;
use clinicdesk_store::Stores;
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse arguments first so --help works without configuration
    let cli = Cli::parse();

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ClientConfig::from_env()?;

    // Initialize logging; stdout is reserved for command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let (api, session) = clinicdesk_client::connect(&config)?;
    let stores = Stores::new(api, session, &config);

    if let Some(credentials) = &config.credentials {
        stores.auth.login(credentials).await?;
    } else {
        info!("No credentials configured, continuing without a session");
    }

    let today = chrono::Local::now().date_naive();
    match clinicdesk_cli::run(cli, &stores, today).await {
        Ok(output) => println!("{output}"),
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    }

    Ok(())
}
