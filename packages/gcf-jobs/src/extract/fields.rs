//! Per-candidate field extraction.
//!
//! Every lookup here is pure and tolerant of absence: a missing field falls
//! back to the next heuristic and finally to a default. Only a candidate
//! without a usable link is dropped.

use scraper::{ElementRef, Html};
use url::Url;

use super::selectors::{class_contains, href, is_anchor, stripped_text, Selectors};
use crate::config::ScraperConfig;
use crate::error::{ScrapeError, ScrapeResult};
use crate::types::job::JobRecordBuilder;

/// Fields read from one candidate on the listing page.
///
/// Owned, so the parsed listing can be dropped before any detail page is
/// visited.
#[derive(Debug, Clone)]
pub struct CandidateDraft {
    pub record: JobRecordBuilder,
    /// Location found inside the candidate itself, used only if nothing
    /// better turns up.
    pub fallback_location: Option<String>,
}

/// Fields read from a job detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub title: Option<String>,
    pub location: Option<String>,
}

/// Resolve `href` against the site origin.
///
/// Absolute URLs are returned unchanged.
pub fn resolve_link(href: &str, origin: &str) -> ScrapeResult<String> {
    let href = href.trim();
    if Url::parse(href).is_ok() {
        return Ok(href.to_string());
    }

    let base = Url::parse(origin).map_err(|_| ScrapeError::InvalidUrl {
        url: origin.to_string(),
    })?;
    base.join(href)
        .map(|u| u.to_string())
        .map_err(|_| ScrapeError::InvalidUrl {
            url: href.to_string(),
        })
}

/// The candidate's own target if it is a link, else the first link inside it.
pub fn candidate_href<'a>(candidate: ElementRef<'a>, selectors: &Selectors) -> Option<&'a str> {
    if is_anchor(candidate) {
        return href(candidate);
    }
    candidate.select(&selectors.link).find_map(href)
}

/// Title of a container candidate: a `*title*` element, else the first
/// link's text, else the leading characters of the container's text.
pub fn container_title(
    candidate: ElementRef<'_>,
    selectors: &Selectors,
    config: &ScraperConfig,
) -> String {
    if let Some(el) = candidate
        .select(&selectors.title_like)
        .find(|el| class_contains(*el, "title"))
    {
        return stripped_text(el);
    }

    if let Some(anchor) = candidate.select(&selectors.anchor).next() {
        return stripped_text(anchor);
    }

    stripped_text(candidate)
        .chars()
        .take(config.fallback_title_chars)
        .collect()
}

/// Nearest enclosing `div`, `article` or `li`.
fn card_ancestor(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| matches!(el.value().name(), "div" | "article" | "li"))
}

fn mentions_location(text: &str, config: &ScraperConfig) -> bool {
    config.location_keywords.iter().any(|k| text.contains(k.as_str()))
}

/// Location text next to a link candidate, searched in its enclosing card.
///
/// The last matching block wins, so the innermost text usually does.
pub fn sibling_location(
    anchor: ElementRef<'_>,
    selectors: &Selectors,
    config: &ScraperConfig,
) -> Option<String> {
    let card = card_ancestor(anchor)?;
    card.select(&selectors.text_block)
        .map(stripped_text)
        .filter(|text| mentions_location(text, config))
        .last()
}

/// Location inside the candidate: a `*location*` element, else any text node
/// mentioning a known place.
pub fn candidate_location(
    candidate: ElementRef<'_>,
    selectors: &Selectors,
    config: &ScraperConfig,
) -> Option<String> {
    if let Some(el) = candidate
        .select(&selectors.text_block)
        .find(|el| class_contains(*el, "location"))
    {
        return Some(stripped_text(el));
    }

    candidate
        .descendants()
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .find(|text| mentions_location(text, config))
        .map(str::to_string)
}

/// Department or category, empty when absent.
pub fn department(candidate: ElementRef<'_>, selectors: &Selectors) -> String {
    candidate
        .select(&selectors.text_block)
        .find(|el| class_contains(*el, "department") || class_contains(*el, "category"))
        .map(stripped_text)
        .unwrap_or_default()
}

/// Posting date as displayed, empty when absent.
pub fn posting_date(candidate: ElementRef<'_>, selectors: &Selectors) -> String {
    candidate
        .select(&selectors.date_like)
        .find(|el| class_contains(*el, "date"))
        .map(stripped_text)
        .unwrap_or_default()
}

/// Read every listing-page field of one candidate.
///
/// Returns `Ok(None)` when the candidate has no link.
pub fn extract_candidate(
    candidate: ElementRef<'_>,
    selectors: &Selectors,
    config: &ScraperConfig,
) -> ScrapeResult<Option<CandidateDraft>> {
    let Some(target) = candidate_href(candidate, selectors) else {
        return Ok(None);
    };
    let link = resolve_link(target, &config.site_origin)?;

    let mut record = JobRecordBuilder::new(link);
    if is_anchor(candidate) {
        record = record.with_title(stripped_text(candidate));
        if let Some(location) = sibling_location(candidate, selectors, config) {
            record = record.with_location(location);
        }
    } else {
        record = record.with_title(container_title(candidate, selectors, config));
    }

    record = record
        .with_department(department(candidate, selectors))
        .with_pub_date(posting_date(candidate, selectors));

    Ok(Some(CandidateDraft {
        record,
        fallback_location: candidate_location(candidate, selectors, config),
    }))
}

/// True if `title` is missing, too short, or a generic placeholder.
pub fn needs_detail_lookup(title: &str, config: &ScraperConfig) -> bool {
    let title = title.trim();
    title.is_empty()
        || title.chars().count() < config.min_title_len
        || title.starts_with(config.placeholder_title_prefix.as_str())
}

/// Pull the title and location off a job detail page.
pub fn parse_detail_page(html: &str, selectors: &Selectors, config: &ScraperConfig) -> DetailFields {
    let document = Html::parse_document(html);

    let title = document
        .select(&selectors.page_heading)
        .next()
        .or_else(|| {
            document
                .select(&selectors.sub_heading)
                .find(|el| class_contains(*el, "title"))
        })
        .map(stripped_text);

    let location = document
        .root_element()
        .descendants()
        .find(|node| {
            node.value().as_text().is_some_and(|text| {
                config
                    .detail_location_labels
                    .iter()
                    .any(|label| text.contains(label.as_str()))
            })
        })
        .and_then(|node| node.parent())
        .and_then(ElementRef::wrap)
        .map(|parent| {
            let mut text = stripped_text(parent);
            for label in &config.detail_location_labels {
                text = text.replace(label.as_str(), "");
            }
            text.trim().to_string()
        })
        .filter(|text| !text.is_empty());

    DetailFields { title, location }
}
