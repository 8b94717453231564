//! Green Climate Fund job feed.
//!
//! Scrapes the job portal at <https://jobs.greenclimate.fund/> and publishes
//! the postings as an RSS 2.0 feed.
//!
//! The portal renders its listing client-side, so pages are loaded through a
//! real browser ([`Browser`]) and the rendered markup is mined with a cascade
//! of heuristics. Expect them to need patching whenever the portal's markup
//! changes.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gcf_jobs::{scrape_jobs, write_feed, Config, WebDriverBrowser};
//!
//! let config = Config::from_env();
//! let browser = WebDriverBrowser::connect(&config.scraper).await?;
//! let jobs = scrape_jobs(&browser, &config.scraper).await;
//! write_feed(&jobs, &config.feed).await?;
//! ```
//!
//! # Modules
//!
//! - [`extract`] - Candidate discovery and field extraction
//! - [`feed`] - RSS rendering
//! - [`browsers`] - WebDriver and mock browsers
//! - [`types`] - Job records

pub mod browsers;
pub mod config;
pub mod error;
pub mod extract;
pub mod feed;
pub mod traits;
pub mod types;

pub use browsers::{MockBrowser, WebDriverBrowser};
pub use config::{Config, FeedConfig, ScraperConfig, WaitConfig};
pub use error::{BrowserError, FeedError, ScrapeError};
pub use extract::scrape_jobs;
pub use feed::{render_feed, write_feed};
pub use traits::browser::Browser;
pub use types::job::{JobRecord, JobRecordBuilder};
