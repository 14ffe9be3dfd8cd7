use std::error::Error;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file, if present.
    let _ = dotenvy::dotenv();

    // INFO everywhere, with provider-call logs from the LLM service kept
    // at INFO as well even when RUST_LOG narrows the global level.
    let filter = llm_service::telemetry::env_filter_with_level("info", Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_timer(llm_service::telemetry::UtcTimer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    api::start().await?;

    Ok(())
}
