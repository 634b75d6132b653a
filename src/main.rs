use anaparima::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting Anapā Rima site service");

    // Load configuration
    let config = startup::load_config().await?;

    // Start the server
    startup::start_server(config).await
}
