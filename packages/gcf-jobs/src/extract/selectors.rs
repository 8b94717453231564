//! CSS selectors and small DOM helpers shared by the extraction steps.

use scraper::{ElementRef, Selector};

use crate::error::{ScrapeError, ScrapeResult};

/// Selectors used by discovery and field extraction, compiled once per run.
#[derive(Debug, Clone)]
pub struct Selectors {
    /// Hyperlinks with a target
    pub link: Selector,
    /// Any hyperlink
    pub anchor: Selector,
    /// Job-card containers
    pub card: Selector,
    /// Containers carrying `data-automation-id`
    pub automation: Selector,
    pub card_heading: Selector,
    pub title_like: Selector,
    pub text_block: Selector,
    pub date_like: Selector,
    pub page_heading: Selector,
    pub sub_heading: Selector,
}

impl Selectors {
    pub fn compile() -> ScrapeResult<Self> {
        Ok(Self {
            link: parse("a[href]")?,
            anchor: parse("a")?,
            card: parse("div, article, li")?,
            automation: parse("div[data-automation-id], article[data-automation-id]")?,
            card_heading: parse("h2, h3, h4")?,
            title_like: parse("h2, h3, h4, a, span")?,
            text_block: parse("span, div, p")?,
            date_like: parse("span, div, time")?,
            page_heading: parse("h1")?,
            sub_heading: parse("h2, h3")?,
        })
    }
}

fn parse(selector: &str) -> ScrapeResult<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

/// Visible text with each text node trimmed and empty nodes dropped,
/// concatenated without separators.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// True if the element's `class` attribute contains `needle` (case-insensitive).
pub fn class_contains(element: ElementRef<'_>, needle: &str) -> bool {
    attr_contains(element, "class", needle)
}

/// True if attribute `name` contains `needle` (case-insensitive).
pub fn attr_contains(element: ElementRef<'_>, name: &str, needle: &str) -> bool {
    element
        .value()
        .attr(name)
        .map(|v| v.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

pub fn is_anchor(element: ElementRef<'_>) -> bool {
    element.value().name() == "a"
}

/// The element's `href`, if present and not blank.
pub fn href(element: ElementRef<'_>) -> Option<&str> {
    element
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|h| !h.is_empty())
}
