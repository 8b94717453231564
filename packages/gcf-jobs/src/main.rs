// Entry point: scrape the job portal and write the RSS feed

use anyhow::{Context, Result};
use gcf_jobs::{scrape_jobs, write_feed, Config, WebDriverBrowser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gcf_jobs=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Green Climate Fund Job Scraper");

    let config = Config::from_env();

    let jobs = match WebDriverBrowser::connect(&config.scraper).await {
        Ok(browser) => scrape_jobs(&browser, &config.scraper).await,
        Err(e) => {
            tracing::error!(error = %e, "Could not start browser");
            Vec::new()
        }
    };

    // Keep the previously published feed rather than replacing it with an empty one.
    if jobs.is_empty() {
        tracing::error!("No jobs found. Please check the website structure.");
        return Ok(());
    }

    write_feed(&jobs, &config.feed)
        .await
        .with_context(|| format!("Failed to write feed to {}", config.feed.output_path.display()))?;

    tracing::info!(jobs = jobs.len(), "Scraping completed successfully");
    Ok(())
}
