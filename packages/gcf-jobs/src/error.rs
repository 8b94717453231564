//! Typed errors for the scraper and feed builder.
//!
//! Uses `thiserror` for library errors (not `anyhow`); the binary wraps
//! these with `anyhow` at the process boundary.

use thiserror::Error;

/// Errors raised by the rendering environment.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Could not start a WebDriver session
    #[error("failed to start browser session: {0}")]
    Session(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A WebDriver command failed (navigation, script, lookup, click)
    #[error("browser command `{command}` failed: {source}")]
    Command {
        command: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No canned page for the requested URL (mock browser)
    #[error("no page loaded for: {url}")]
    PageNotFound { url: String },
}

impl BrowserError {
    pub(crate) fn command(
        command: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Command {
            command,
            source: Box::new(source),
        }
    }
}

/// Errors that can occur while extracting job records.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Rendering environment failed
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    /// A CSS selector did not compile
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// A link could not be resolved to an absolute URL
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// Errors that can occur while rendering or writing the feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Writing the output file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML serialization failed
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Rendered bytes were not valid UTF-8
    #[error("feed is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias for scrape operations.
pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for browser operations.
pub type BrowserResult<T> = std::result::Result<T, BrowserError>;

/// Result type alias for feed operations.
pub type FeedResult<T> = std::result::Result<T, FeedError>;
