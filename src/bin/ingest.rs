//! Offline ingest: load CV documents, chunk, embed, rebuild the Qdrant
//! collection, and upsert. Run this before starting the server.

use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use cv_index::embed::ProfilesEmbedder;
use cv_index::{CvIndex, IndexConfig, ingest::run_ingest};
use llm_service::service_profiles::LlmServiceProfiles;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_timer(llm_service::telemetry::UtcTimer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let svc = Arc::new(LlmServiceProfiles::from_env().context("LLM service config")?);
    let cfg = IndexConfig::from_env().context("index config")?;

    let embedder = Arc::new(ProfilesEmbedder::new(svc));
    let index = CvIndex::new(cfg, embedder.clone()).context("index setup")?;

    let stats = run_ingest(&index, embedder.as_ref())
        .await
        .context("ingest failed")?;

    println!(
        "{} {} documents -> {} chunks ({} points, dim {}) in collection '{}'",
        "Ingest complete:".green().bold(),
        stats.documents,
        stats.chunks,
        stats.points,
        stats.dimension,
        stats.collection
    );

    Ok(())
}
