//! Mock browser for testing.
//!
//! Serves canned markup per URL and records every command it receives.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::error::{BrowserError, BrowserResult};
use crate::traits::browser::Browser;

#[derive(Default)]
struct MockState {
    pages: HashMap<String, String>,
    /// Markup swapped in for a URL once the matching label is clicked
    after_click: HashMap<(String, String), String>,
    failing_urls: HashSet<String>,
    current_url: Option<String>,
    goto_calls: Vec<String>,
    click_calls: Vec<String>,
    scripts: Vec<String>,
    close_calls: usize,
    abandon_calls: usize,
}

/// Mock browser for testing.
///
/// # Example
///
/// ```rust
/// use gcf_jobs::browsers::MockBrowser;
///
/// let browser = MockBrowser::new()
///     .with_page("https://example.com/jobs", "<a href='/job/1'>Engineer</a>");
/// ```
#[derive(Clone, Default)]
pub struct MockBrowser {
    state: Arc<Mutex<MockState>>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .pages
            .insert(url.to_string(), html.to_string());
        self
    }

    /// Replace the markup of `url` after an element containing `label` is clicked.
    pub fn with_page_after_click(self, url: &str, label: &str, html: &str) -> Self {
        self.state.lock().unwrap().after_click.insert(
            (url.to_string(), label.to_string()),
            html.to_string(),
        );
        self
    }

    /// Make navigation to `url` fail.
    pub fn with_failing_url(self, url: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_urls
            .insert(url.to_string());
        self
    }

    /// URLs navigated to, in order.
    pub fn goto_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().goto_calls.clone()
    }

    /// Labels passed to `click_text`, in order.
    pub fn click_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().click_calls.clone()
    }

    /// Scripts executed, in order.
    pub fn scripts(&self) -> Vec<String> {
        self.state.lock().unwrap().scripts.clone()
    }

    /// Number of times `close` was called.
    pub fn close_count(&self) -> usize {
        self.state.lock().unwrap().close_calls
    }

    /// Number of times `abandon` was called.
    pub fn abandon_count(&self) -> usize {
        self.state.lock().unwrap().abandon_calls
    }

    /// Check if a URL was visited
    pub fn was_visited(&self, url: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .goto_calls
            .iter()
            .any(|u| u == url)
    }
}

#[async_trait]
impl Browser for MockBrowser {
    async fn goto(&self, url: &str) -> BrowserResult<()> {
        let mut state = self.state.lock().unwrap();
        state.goto_calls.push(url.to_string());

        if state.failing_urls.contains(url) {
            return Err(BrowserError::command(
                "goto",
                std::io::Error::new(std::io::ErrorKind::TimedOut, "navigation timed out"),
            ));
        }

        state.current_url = Some(url.to_string());
        Ok(())
    }

    async fn click_text(&self, label: &str) -> BrowserResult<bool> {
        let mut state = self.state.lock().unwrap();
        state.click_calls.push(label.to_string());

        let Some(url) = state.current_url.clone() else {
            return Ok(false);
        };
        let found = state
            .pages
            .get(&url)
            .map(|html| html.contains(label))
            .unwrap_or(false);

        if found {
            let swapped = state
                .after_click
                .get(&(url.clone(), label.to_string()))
                .cloned();
            if let Some(html) = swapped {
                state.pages.insert(url, html);
            }
        }

        Ok(found)
    }

    async fn execute(&self, script: &str) -> BrowserResult<()> {
        self.state.lock().unwrap().scripts.push(script.to_string());
        Ok(())
    }

    async fn page_source(&self) -> BrowserResult<String> {
        let state = self.state.lock().unwrap();
        let url = state.current_url.clone().unwrap_or_default();
        state
            .pages
            .get(&url)
            .cloned()
            .ok_or(BrowserError::PageNotFound { url })
    }

    async fn close(&self) -> BrowserResult<()> {
        self.state.lock().unwrap().close_calls += 1;
        Ok(())
    }

    fn abandon(&self) {
        // Runs from a drop guard, possibly while unwinding.
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.abandon_calls += 1;
    }

    fn name(&self) -> &str {
        "mock"
    }
}
