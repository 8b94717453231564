//! Browser trait for the rendering environment.
//!
//! The job portal renders its listing client-side, so a plain HTTP fetch
//! only sees an empty shell. The extractor talks to a real browser through
//! this trait; tests swap in [`MockBrowser`](crate::browsers::MockBrowser).

use async_trait::async_trait;

use crate::error::BrowserResult;

/// Script that scrolls to the bottom of the document (triggers lazy loading).
pub const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Script that scrolls back to the top of the document.
pub const SCROLL_TO_TOP: &str = "window.scrollTo(0, 0);";

/// A single browser session.
///
/// Implementations hold one tab and execute commands sequentially.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Navigate to `url` and wait for the load event.
    async fn goto(&self, url: &str) -> BrowserResult<()>;

    /// Click the first element whose text contains `label`.
    ///
    /// Returns `false` when no such element exists.
    async fn click_text(&self, label: &str) -> BrowserResult<bool>;

    /// Run a script in the current page.
    async fn execute(&self, script: &str) -> BrowserResult<()>;

    /// Rendered markup of the current page.
    async fn page_source(&self) -> BrowserResult<String>;

    /// End the session. Called exactly once per run that finishes.
    async fn close(&self) -> BrowserResult<()>;

    /// Release the session without waiting for it.
    ///
    /// Called instead of [`close`](Browser::close) when a run is cut short
    /// by a panic or by its future being dropped.
    fn abandon(&self) {}

    /// Browser name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
