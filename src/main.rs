use ai_llm_service::telemetry;
use anyhow::Context;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file when one exists.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", Level::INFO))
        .with(telemetry::layer())
        .try_init()
        .context("failed to install tracing subscriber")?;

    println!(
        "{} {}",
        "KENVI".bold().green(),
        "assistant for PM Shri Kendriya Vidyalaya Bolarum".dimmed()
    );

    api::start().await.context("KENVI API stopped with an error")?;

    Ok(())
}
