//! Configuration for scraping and feed generation.
//!
//! Every tunable lives here with a compiled-in default. [`Config::from_env`]
//! only overrides the few values that depend on the machine the scraper runs
//! on (WebDriver endpoint, output path, debug dumps).

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Listing page on the Oracle HCM candidate-experience site.
pub const LISTING_URL: &str = "https://jobs.greenclimate.fund/en/sites/CX_1001/jobs";

/// Origin that relative job links are resolved against.
pub const SITE_ORIGIN: &str = "https://jobs.greenclimate.fund";

/// Canonical URL the published feed is served from.
pub const FEED_SELF_URL: &str = "https://cinfoposte.github.io/gcf-jobs/gcf_jobs.xml";

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "gcf_jobs.xml";

/// Default WebDriver endpoint (`chromedriver --port=4444`).
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Location used when none can be found.
pub const DEFAULT_LOCATION: &str = "Not specified";

/// Maximum number of candidates processed per run.
pub const MAX_CANDIDATES: usize = 50;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Top-level configuration for one run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub feed: FeedConfig,
}

impl Config {
    /// Load configuration, applying environment overrides.
    ///
    /// Reads a `.env` file if present (development).
    pub fn from_env() -> Self {
        let _ = dotenv();

        let mut config = Self::default();

        if let Ok(url) = env::var("WEBDRIVER_URL") {
            config.scraper.webdriver_url = url;
        }
        if let Ok(path) = env::var("GCF_FEED_OUTPUT") {
            config.feed.output_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("GCF_DEBUG_SNAPSHOT") {
            if !path.trim().is_empty() {
                config.scraper.debug_snapshot_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(path) = env::var("GCF_DEBUG_RECORDS") {
            if !path.trim().is_empty() {
                config.scraper.debug_records_path = Some(PathBuf::from(path));
            }
        }

        config
    }
}

/// Fixed settle delays inserted while the listing renders.
///
/// None of these are adaptive; each is a plain sleep.
#[derive(Debug, Clone)]
pub struct WaitConfig {
    /// After the initial page load, for the client-side API calls to finish.
    pub initial_load: Duration,

    /// After activating the listing tab.
    pub tab_click: Duration,

    /// After scrolling to the bottom of the page.
    pub scroll_down: Duration,

    /// After scrolling back to the top.
    pub scroll_up: Duration,

    /// After opening a job detail page.
    pub detail_page: Duration,

    /// After navigating back to the listing.
    pub return_to_listing: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            initial_load: Duration::from_secs(15),
            tab_click: Duration::from_secs(5),
            scroll_down: Duration::from_secs(3),
            scroll_up: Duration::from_secs(2),
            detail_page: Duration::from_secs(3),
            return_to_listing: Duration::from_secs(2),
        }
    }
}

impl WaitConfig {
    /// No waiting at all. Used with synthetic fixtures.
    pub fn none() -> Self {
        Self {
            initial_load: Duration::ZERO,
            tab_click: Duration::ZERO,
            scroll_down: Duration::ZERO,
            scroll_up: Duration::ZERO,
            detail_page: Duration::ZERO,
            return_to_listing: Duration::ZERO,
        }
    }
}

/// Configuration for the extractor.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Listing page to scrape.
    pub listing_url: String,

    /// Origin prepended to relative job links.
    pub site_origin: String,

    /// WebDriver endpoint the browser session is opened against.
    pub webdriver_url: String,

    /// User-agent presented by the headless browser.
    pub user_agent: String,

    /// Viewport width in pixels.
    pub window_width: u32,

    /// Viewport height in pixels.
    pub window_height: u32,

    /// Label of the tab that reveals the listing (clicked best-effort).
    pub tab_label: String,

    pub waits: WaitConfig,

    /// Candidates processed per run, in document order.
    pub max_candidates: usize,

    /// Case-insensitive href substrings that mark a job link.
    pub job_link_patterns: Vec<String>,

    /// Text/href keywords of global navigation links.
    pub skip_keywords: Vec<String>,

    /// Substrings that identify location text.
    pub location_keywords: Vec<String>,

    /// Labels preceding the location on a job detail page.
    pub detail_location_labels: Vec<String>,

    /// Titles starting with this are treated as placeholders.
    pub placeholder_title_prefix: String,

    /// Titles shorter than this (in characters) are refined from the detail page.
    pub min_title_len: usize,

    /// Characters of container text used as a last-resort title.
    pub fallback_title_chars: usize,

    /// Location sentinel for unknown locations.
    pub default_location: String,

    /// Where to dump the rendered listing markup, if anywhere.
    pub debug_snapshot_path: Option<PathBuf>,

    /// Where to dump the extracted records as JSON, if anywhere.
    pub debug_records_path: Option<PathBuf>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            listing_url: LISTING_URL.to_string(),
            site_origin: SITE_ORIGIN.to_string(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            window_width: 1920,
            window_height: 1080,
            tab_label: "Staffs".to_string(),
            waits: WaitConfig::default(),
            max_candidates: MAX_CANDIDATES,
            job_link_patterns: strings(&["/requisition", "/job/", "requisitionid", "jobdetails"]),
            skip_keywords: strings(&["sitemap", "account", "sign-in", "profile", "help", "about"]),
            location_keywords: strings(&[
                "Remote",
                "Hybrid",
                "Incheon",
                "Korea",
                "Republic of Korea",
            ]),
            detail_location_labels: strings(&["Location:", "Posting Location"]),
            placeholder_title_prefix: "Position".to_string(),
            min_title_len: 5,
            fallback_title_chars: 100,
            default_location: DEFAULT_LOCATION.to_string(),
            debug_snapshot_path: None,
            debug_records_path: None,
        }
    }
}

impl ScraperConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the scraper at a different listing page.
    pub fn with_listing_url(mut self, url: impl Into<String>) -> Self {
        self.listing_url = url.into();
        self
    }

    /// Resolve relative links against a different origin.
    pub fn with_site_origin(mut self, origin: impl Into<String>) -> Self {
        self.site_origin = origin.into();
        self
    }

    /// Replace the settle delays.
    pub fn with_waits(mut self, waits: WaitConfig) -> Self {
        self.waits = waits;
        self
    }

    /// Set the candidate cap.
    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }

    /// Dump the rendered listing markup to `path`.
    pub fn with_debug_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_snapshot_path = Some(path.into());
        self
    }

    /// Dump the extracted records to `path` as JSON.
    pub fn with_debug_records(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_records_path = Some(path.into());
        self
    }
}

/// Channel metadata and output location for the RSS feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,

    /// Canonical feed URL, emitted as `atom:link rel="self"`.
    pub self_link: String,

    pub output_path: PathBuf,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: "Green Climate Fund Jobs".to_string(),
            link: LISTING_URL.to_string(),
            description: "Job listings from Green Climate Fund".to_string(),
            language: "en-us".to_string(),
            self_link: FEED_SELF_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
