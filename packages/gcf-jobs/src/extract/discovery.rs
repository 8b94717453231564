//! Candidate discovery.
//!
//! The listing markup is not under our control, so candidates are located by
//! a cascade of heuristics. Strategies run in order and the first one that
//! finds anything wins. Navigation links are then filtered out and the
//! survivors capped.

use scraper::{ElementRef, Html};
use tracing::{debug, info};

use super::selectors::{attr_contains, class_contains, href, is_anchor, stripped_text, Selectors};
use crate::config::ScraperConfig;

/// A discovery heuristic: returns candidate elements in document order.
pub type Strategy = for<'a> fn(&'a Html, &Selectors, &ScraperConfig) -> Vec<ElementRef<'a>>;

/// Strategies in priority order.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("job links", job_links),
    ("title cards", title_cards),
    ("automation containers", automation_containers),
];

/// Candidates found by the first successful strategy.
#[derive(Debug)]
pub struct Discovery<'a> {
    /// Name of the strategy that produced the candidates, if any did.
    pub strategy: Option<&'static str>,
    pub candidates: Vec<ElementRef<'a>>,
}

/// Hyperlinks whose target looks like a job posting.
pub fn job_links<'a>(
    document: &'a Html,
    selectors: &Selectors,
    config: &ScraperConfig,
) -> Vec<ElementRef<'a>> {
    document
        .select(&selectors.link)
        .filter(|a| {
            let target = href(*a).unwrap_or_default().to_lowercase();
            config
                .job_link_patterns
                .iter()
                .any(|p| target.contains(&p.to_lowercase()))
        })
        .collect()
}

/// Containers holding both a title heading and a link.
pub fn title_cards<'a>(
    document: &'a Html,
    selectors: &Selectors,
    _config: &ScraperConfig,
) -> Vec<ElementRef<'a>> {
    document
        .select(&selectors.card)
        .filter(|card| {
            card.select(&selectors.card_heading)
                .any(|h| class_contains(h, "title"))
                && card.select(&selectors.link).next().is_some()
        })
        .collect()
}

/// Containers whose `data-automation-id` mentions a job.
pub fn automation_containers<'a>(
    document: &'a Html,
    selectors: &Selectors,
    _config: &ScraperConfig,
) -> Vec<ElementRef<'a>> {
    document
        .select(&selectors.automation)
        .filter(|el| attr_contains(*el, "data-automation-id", "job"))
        .collect()
}

/// Run the strategies in order, stopping at the first non-empty result.
pub fn discover<'a>(
    document: &'a Html,
    selectors: &Selectors,
    config: &ScraperConfig,
) -> Discovery<'a> {
    for &(name, strategy) in STRATEGIES {
        let candidates = strategy(document, selectors, config);
        debug!(strategy = name, found = candidates.len(), "Discovery strategy ran");
        if !candidates.is_empty() {
            info!(strategy = name, found = candidates.len(), "Found job candidates");
            return Discovery {
                strategy: Some(name),
                candidates,
            };
        }
    }

    Discovery {
        strategy: None,
        candidates: Vec::new(),
    }
}

/// True if the candidate looks like global navigation (sitemap, sign-in, ...).
pub fn is_navigation(candidate: ElementRef<'_>, config: &ScraperConfig) -> bool {
    let text = stripped_text(candidate).to_lowercase();
    let target = if is_anchor(candidate) {
        href(candidate).unwrap_or_default().to_lowercase()
    } else {
        String::new()
    };

    config.skip_keywords.iter().any(|keyword| {
        let keyword = keyword.to_lowercase();
        text.contains(&keyword) || target.contains(&keyword)
    })
}

/// Discover, drop navigation links and cap the result.
pub fn select_candidates<'a>(
    document: &'a Html,
    selectors: &Selectors,
    config: &ScraperConfig,
) -> Vec<ElementRef<'a>> {
    let discovery = discover(document, selectors, config);
    let total = discovery.candidates.len();

    let filtered: Vec<_> = discovery
        .candidates
        .into_iter()
        .filter(|c| !is_navigation(*c, config))
        .collect();

    info!(
        discovered = total,
        after_filtering = filtered.len(),
        cap = config.max_candidates,
        "Processing potential job listings"
    );

    filtered.into_iter().take(config.max_candidates).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Selectors, ScraperConfig) {
        (Selectors::compile().unwrap(), ScraperConfig::default())
    }

    #[test]
    fn test_job_links_match_known_patterns() {
        let (selectors, config) = setup();
        let document = Html::parse_document(
            r#"<body>
                <a href="/en/sites/CX_1001/job/101">Climate Analyst</a>
                <a href="/hcmUI/CandidateExperience/RequisitionDetails?RequisitionId=7">Officer</a>
                <a href="/JobDetails/55">Specialist</a>
                <a href="/news">News</a>
            </body>"#,
        );

        let found = job_links(&document, &selectors, &config);
        assert_eq!(found.len(), 3);
        assert_eq!(stripped_text(found[0]), "Climate Analyst");
    }

    #[test]
    fn test_job_links_win_over_later_strategies() {
        let (selectors, config) = setup();
        let document = Html::parse_document(
            r#"<body>
                <div class="card"><h3 class="job-title">Card</h3><a href="/x">x</a></div>
                <div data-automation-id="jobItem">Container</div>
                <a href="/job/1">Climate Analyst</a>
            </body>"#,
        );

        let discovery = discover(&document, &selectors, &config);
        assert_eq!(discovery.strategy, Some("job links"));
        assert_eq!(discovery.candidates.len(), 1);
    }

    #[test]
    fn test_title_cards_fallback() {
        let (selectors, config) = setup();
        let document = Html::parse_document(
            r#"<body>
                <li class="card"><h3 class="job-title">Analyst</h3><a href="/posting/1">Open</a></li>
                <li class="card"><h3>No title class</h3><a href="/posting/2">Open</a></li>
                <li class="card"><h3 class="title">No link</h3></li>
            </body>"#,
        );

        let discovery = discover(&document, &selectors, &config);
        assert_eq!(discovery.strategy, Some("title cards"));
        assert_eq!(discovery.candidates.len(), 1);
        assert_eq!(discovery.candidates[0].value().name(), "li");
    }

    #[test]
    fn test_automation_containers_last_resort() {
        let (selectors, config) = setup();
        let document = Html::parse_document(
            r#"<body>
                <div data-automation-id="JobCard">One</div>
                <article data-automation-id="job-row">Two</article>
                <div data-automation-id="footer">Three</div>
            </body>"#,
        );

        let discovery = discover(&document, &selectors, &config);
        assert_eq!(discovery.strategy, Some("automation containers"));
        assert_eq!(discovery.candidates.len(), 2);
    }

    #[test]
    fn test_nothing_found() {
        let (selectors, config) = setup();
        let document = Html::parse_document("<body><p>Loading...</p></body>");

        let discovery = discover(&document, &selectors, &config);
        assert_eq!(discovery.strategy, None);
        assert!(discovery.candidates.is_empty());
    }

    #[test]
    fn test_navigation_links_filtered() {
        let (selectors, config) = setup();
        let document = Html::parse_document(
            r#"<body>
                <a href="/job/sitemap">Sitemap</a>
                <a href="/job/1">Sign-In to your Account</a>
                <a href="/job/profile/edit">Edit</a>
                <a href="/job/2">Climate Finance Specialist</a>
            </body>"#,
        );

        let candidates = select_candidates(&document, &selectors, &config);
        assert_eq!(candidates.len(), 1);
        assert_eq!(stripped_text(candidates[0]), "Climate Finance Specialist");
    }

    #[test]
    fn test_cap_applies_after_filtering() {
        let (selectors, config) = setup();
        let config = config.with_max_candidates(2);
        let document = Html::parse_document(
            r#"<body>
                <a href="/job/help">Help</a>
                <a href="/job/1">First Position</a>
                <a href="/job/2">Second Position</a>
                <a href="/job/3">Third Position</a>
            </body>"#,
        );

        let candidates = select_candidates(&document, &selectors, &config);
        let titles: Vec<_> = candidates.into_iter().map(stripped_text).collect();
        assert_eq!(titles, vec!["First Position", "Second Position"]);
    }
}
