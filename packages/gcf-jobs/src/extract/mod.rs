//! Job extraction pipeline.
//!
//! 1. Load the listing in the browser and let client-side rendering settle
//! 2. Activate the listing tab and scroll to trigger lazy loading
//! 3. Snapshot the rendered markup once
//! 4. Discover, filter and cap candidates ([`discovery`])
//! 5. Read each candidate's fields ([`fields`])
//! 6. Visit the detail page of any posting without a usable title
//! 7. Optionally dump the records as JSON
//!
//! Per-candidate failures are logged and skipped. Only a failure to load the
//! listing aborts the run, and then with an empty result.

pub mod discovery;
pub mod fields;
pub mod selectors;

use scraper::Html;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScrapeResult;
use crate::traits::browser::{Browser, SCROLL_TO_BOTTOM, SCROLL_TO_TOP};
use crate::types::job::{placeholder_title, JobRecord, JobRecordBuilder};

pub use discovery::{discover, select_candidates, Discovery, STRATEGIES};
pub use fields::{
    extract_candidate, needs_detail_lookup, parse_detail_page, resolve_link, CandidateDraft,
    DetailFields,
};
pub use selectors::Selectors;

/// Scrape the listing page into job records.
///
/// Never fails: a listing that cannot be loaded yields an empty list. The
/// browser session is closed before returning, or abandoned if the run is
/// interrupted.
pub async fn scrape_jobs<B>(browser: &B, config: &ScraperConfig) -> Vec<JobRecord>
where
    B: Browser + ?Sized,
{
    info!(
        url = %config.listing_url,
        browser = browser.name(),
        "Starting scraper"
    );

    let guard = SessionGuard::new(browser);

    let jobs = match run(browser, config).await {
        Ok(jobs) => {
            info!(count = jobs.len(), "Successfully scraped jobs");
            jobs
        }
        Err(e) => {
            error!(url = %config.listing_url, error = %e, "Error during scraping");
            Vec::new()
        }
    };

    if let Err(e) = browser.close().await {
        warn!(error = %e, "Failed to close browser session");
    }
    guard.disarm();

    jobs
}

/// Abandons the browser session unless disarmed, so a run that panics or is
/// cancelled still releases it.
struct SessionGuard<'a, B: Browser + ?Sized> {
    browser: &'a B,
    armed: bool,
}

impl<'a, B: Browser + ?Sized> SessionGuard<'a, B> {
    fn new(browser: &'a B) -> Self {
        Self {
            browser,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<B: Browser + ?Sized> Drop for SessionGuard<'_, B> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Scrape interrupted, abandoning browser session");
            self.browser.abandon();
        }
    }
}

async fn run<B>(browser: &B, config: &ScraperConfig) -> ScrapeResult<Vec<JobRecord>>
where
    B: Browser + ?Sized,
{
    let selectors = Selectors::compile()?;
    let listing = load_listing(browser, config).await?;

    if let Some(path) = &config.debug_snapshot_path {
        match tokio::fs::write(path, &listing).await {
            Ok(()) => info!(path = %path.display(), "Saved listing snapshot"),
            Err(e) => warn!(path = %path.display(), error = %e, "Could not save listing snapshot"),
        }
    }

    let drafts = collect_drafts(&listing, &selectors, config);

    let mut jobs = Vec::with_capacity(drafts.len());
    for draft in drafts {
        if let Some(job) = finish_draft(browser, draft, &selectors, config).await {
            info!(title = %job.title(), "[OK] Job extracted");
            jobs.push(job);
        }
    }

    if let Some(path) = &config.debug_records_path {
        dump_records(path, &jobs).await;
    }

    Ok(jobs)
}

/// Write the extracted records as pretty JSON. Failures are only logged.
async fn dump_records(path: &Path, jobs: &[JobRecord]) {
    let json = match serde_json::to_string_pretty(jobs) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Could not serialize records");
            return;
        }
    };

    match tokio::fs::write(path, json).await {
        Ok(()) => info!(path = %path.display(), count = jobs.len(), "Saved records dump"),
        Err(e) => warn!(path = %path.display(), error = %e, "Could not save records dump"),
    }
}

/// Load the listing and return its fully rendered markup.
async fn load_listing<B>(browser: &B, config: &ScraperConfig) -> ScrapeResult<String>
where
    B: Browser + ?Sized,
{
    browser.goto(&config.listing_url).await?;
    info!("Page loaded, waiting for JavaScript to render");
    settle(config.waits.initial_load).await;

    match browser.click_text(&config.tab_label).await {
        Ok(true) => {
            info!(tab = %config.tab_label, "Activated listing tab");
            settle(config.waits.tab_click).await;
        }
        Ok(false) => debug!(tab = %config.tab_label, "Listing tab not found"),
        Err(e) => warn!(tab = %config.tab_label, error = %e, "Could not activate listing tab"),
    }

    scroll(browser, SCROLL_TO_BOTTOM, config.waits.scroll_down).await;
    scroll(browser, SCROLL_TO_TOP, config.waits.scroll_up).await;

    Ok(browser.page_source().await?)
}

async fn scroll<B>(browser: &B, script: &str, wait: Duration)
where
    B: Browser + ?Sized,
{
    if let Err(e) = browser.execute(script).await {
        warn!(error = %e, "Scroll failed");
    }
    settle(wait).await;
}

async fn settle(wait: Duration) {
    if !wait.is_zero() {
        tokio::time::sleep(wait).await;
    }
}

/// Parse the snapshot and read every candidate into an owned draft.
pub fn collect_drafts(
    listing: &str,
    selectors: &Selectors,
    config: &ScraperConfig,
) -> Vec<CandidateDraft> {
    let document = Html::parse_document(listing);
    let candidates = select_candidates(&document, selectors, config);

    let mut drafts = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match extract_candidate(candidate, selectors, config) {
            Ok(Some(draft)) => drafts.push(draft),
            Ok(None) => debug!("Candidate has no link, skipping"),
            Err(e) => warn!(error = %e, "[ERROR] Error processing job element"),
        }
    }
    drafts
}

/// Refine the title if needed, settle the location and build the record.
async fn finish_draft<B>(
    browser: &B,
    draft: CandidateDraft,
    selectors: &Selectors,
    config: &ScraperConfig,
) -> Option<JobRecord>
where
    B: Browser + ?Sized,
{
    let mut record = draft.record;
    if needs_detail_lookup(record.title(), config) {
        record = refine_from_detail_page(browser, record, selectors, config).await;
    }

    let job = record
        .with_location_fallback(draft.fallback_location)
        .build(&config.default_location);
    if job.is_none() {
        debug!("Dropping candidate without title or link");
    }
    job
}

/// Visit the posting's detail page for a better title and location, then go
/// back to the listing.
async fn refine_from_detail_page<B>(
    browser: &B,
    mut record: JobRecordBuilder,
    selectors: &Selectors,
    config: &ScraperConfig,
) -> JobRecordBuilder
where
    B: Browser + ?Sized,
{
    let link = record.link().to_string();
    info!(link = %link, "Fetching details for job");

    let use_placeholder = match fetch_detail(browser, &link, selectors, config).await {
        Ok(detail) => {
            if let Some(title) = detail.title {
                record = record.with_title(title);
            }
            if let Some(location) = detail.location {
                record = record.with_location(location);
            }
            record.title().trim().is_empty()
        }
        Err(e) => {
            warn!(link = %link, error = %e, "Could not fetch detail page");
            needs_detail_lookup(record.title(), config)
        }
    };

    if let Err(e) = browser.goto(&config.listing_url).await {
        warn!(error = %e, "Could not navigate back to listing");
    }
    settle(config.waits.return_to_listing).await;

    if use_placeholder {
        record = record.with_title(placeholder_title(&config.placeholder_title_prefix, &link));
    }
    record
}

async fn fetch_detail<B>(
    browser: &B,
    link: &str,
    selectors: &Selectors,
    config: &ScraperConfig,
) -> ScrapeResult<DetailFields>
where
    B: Browser + ?Sized,
{
    browser.goto(link).await?;
    settle(config.waits.detail_page).await;
    let html = browser.page_source().await?;
    Ok(parse_detail_page(&html, selectors, config))
}
