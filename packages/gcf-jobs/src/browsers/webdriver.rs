//! Headless Chrome driven over WebDriver.
//!
//! Needs a WebDriver server (e.g. `chromedriver --port=4444`) listening at
//! [`ScraperConfig::webdriver_url`].

use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::{BrowserError, BrowserResult};
use crate::traits::browser::Browser;

/// Browser session backed by a WebDriver server.
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Open a headless Chrome session with a fixed viewport and user agent.
    pub async fn connect(config: &ScraperConfig) -> BrowserResult<Self> {
        info!(webdriver_url = %config.webdriver_url, "Starting headless browser session");

        let client = ClientBuilder::native()
            .capabilities(Self::capabilities(config))
            .connect(&config.webdriver_url)
            .await
            .map_err(|e| BrowserError::Session(Box::new(e)))?;

        Ok(Self { client })
    }

    fn capabilities(config: &ScraperConfig) -> Map<String, Value> {
        let args = vec![
            "--headless".to_string(),
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-gpu".to_string(),
            format!(
                "--window-size={},{}",
                config.window_width, config.window_height
            ),
            format!("--user-agent={}", config.user_agent),
        ];

        let mut caps = Map::new();
        caps.insert("browserName".to_string(), json!("chrome"));
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
        caps
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn goto(&self, url: &str) -> BrowserResult<()> {
        debug!(url = %url, "Navigating");
        self.client
            .goto(url)
            .await
            .map_err(|e| BrowserError::command("goto", e))
    }

    async fn click_text(&self, label: &str) -> BrowserResult<bool> {
        let xpath = format!("//*[contains(text(), {})]", xpath_literal(label));
        let elements = self
            .client
            .find_all(Locator::XPath(&xpath))
            .await
            .map_err(|e| BrowserError::command("find_all", e))?;

        match elements.first() {
            Some(element) => {
                element
                    .click()
                    .await
                    .map_err(|e| BrowserError::command("click", e))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn execute(&self, script: &str) -> BrowserResult<()> {
        self.client
            .execute(script, Vec::new())
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::command("execute", e))
    }

    async fn page_source(&self) -> BrowserResult<String> {
        self.client
            .source()
            .await
            .map_err(|e| BrowserError::command("source", e))
    }

    async fn close(&self) -> BrowserResult<()> {
        self.client
            .clone()
            .close()
            .await
            .map_err(|e| BrowserError::command("close", e))
    }

    fn abandon(&self) {
        let client = self.client.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = client.close().await {
                        warn!(error = %e, "Failed to close abandoned WebDriver session");
                    }
                });
            }
            Err(_) => warn!("No runtime left to close the WebDriver session"),
        }
    }

    fn name(&self) -> &str {
        "webdriver"
    }
}

/// Quote `value` as an XPath 1.0 string literal.
fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{}'", value)
    } else if !value.contains('"') {
        format!("\"{}\"", value)
    } else {
        let parts: Vec<String> = value
            .split('\'')
            .map(|part| format!("'{}'", part))
            .collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}
