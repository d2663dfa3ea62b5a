use anyhow::Result;
use job_description_api::{setup_logging, start_web_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging first
    let logger = setup_logging();

    let config = AppConfig::load()?;

    info!("Log level: {}", logger.level);
    info!("Listening on {}:{}", config.address, config.port);
    info!("Generation service URL: {}", config.generation_service_url);

    start_web_server(config).await
}
