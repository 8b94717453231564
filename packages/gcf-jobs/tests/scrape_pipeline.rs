//! End-to-end extraction tests against synthetic listing pages.

use gcf_jobs::extract::{discover, select_candidates, Selectors};
use gcf_jobs::{scrape_jobs, JobRecord, MockBrowser, ScraperConfig, WaitConfig};
use proptest::prelude::*;
use scraper::Html;

const LISTING: &str = "https://jobs.example.org/en/sites/CX_1001/jobs";
const ORIGIN: &str = "https://jobs.example.org";

fn config() -> ScraperConfig {
    ScraperConfig::default()
        .with_listing_url(LISTING)
        .with_site_origin(ORIGIN)
        .with_waits(WaitConfig::none())
}

fn listing_with_links(count: usize) -> String {
    let links: String = (0..count)
        .map(|i| {
            format!(
                r#"<li><a href="/en/sites/CX_1001/job/{i}">Climate Officer {i}</a></li>"#
            )
        })
        .collect();
    format!(
        r#"<html><body>
            <nav><a href="/en/sites/CX_1001/my-profile">Profile</a></nav>
            <ul>{links}</ul>
            <div class="card"><h3 class="title">Ignored card</h3><a href="/x">x</a></div>
        </body></html>"#
    )
}

proptest! {
    #[test]
    fn test_job_links_capped_at_fifty(count in 1usize..120) {
        let selectors = Selectors::compile().unwrap();
        let config = config();
        let html = listing_with_links(count);
        let document = Html::parse_document(&html);

        let candidates = select_candidates(&document, &selectors, &config);
        prop_assert_eq!(candidates.len(), count.min(50));

        let discovery = discover(&document, &selectors, &config);
        prop_assert_eq!(discovery.strategy, Some("job links"));
    }
}

#[tokio::test]
async fn test_scrape_listing_with_job_links() {
    let browser = MockBrowser::new().with_page(
        LISTING,
        r#"<html><body>
            <header><a href="/en/sites/CX_1001/job/sitemap">Sitemap</a></header>
            <div class="job-row">
                <a href="/en/sites/CX_1001/job/101">Senior Climate Finance Specialist</a>
                <span>Incheon, Republic of Korea</span>
            </div>
            <div class="job-row">
                <a href="https://jobs.example.org/en/sites/CX_1001/job/102">Legal Counsel (Hybrid)</a>
            </div>
        </body></html>"#,
    );

    let jobs = scrape_jobs(&browser, &config()).await;

    assert_eq!(jobs.len(), 2);

    assert_eq!(jobs[0].title(), "Senior Climate Finance Specialist");
    assert_eq!(
        jobs[0].link(),
        "https://jobs.example.org/en/sites/CX_1001/job/101"
    );
    assert_eq!(jobs[0].location(), "Incheon, Republic of Korea");
    assert_eq!(
        jobs[0].description(),
        "Senior Climate Finance Specialist | Location: Incheon, Republic of Korea"
    );

    assert_eq!(
        jobs[1].link(),
        "https://jobs.example.org/en/sites/CX_1001/job/102"
    );
    // The card holds no location line, so its own text is the closest match.
    assert_eq!(jobs[1].location(), "Legal Counsel (Hybrid)");

    assert_eq!(browser.close_count(), 1);
}

#[tokio::test]
async fn test_placeholder_title_when_detail_page_fails() {
    let detail = "https://jobs.example.org/en/sites/CX_1001/job/1234";
    let browser = MockBrowser::new()
        .with_page(
            LISTING,
            r#"<body><a href="/en/sites/CX_1001/job/1234"></a></body>"#,
        )
        .with_failing_url(detail);

    let jobs = scrape_jobs(&browser, &config()).await;

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title(), "Position 1234");
    assert_eq!(jobs[0].location(), "Not specified");
    assert_eq!(jobs[0].description(), "Position 1234");
    assert_eq!(browser.goto_calls(), vec![LISTING, detail, LISTING]);
}

#[tokio::test]
async fn test_weak_titles_replaced_when_detail_page_fails() {
    let short = "https://jobs.example.org/en/sites/CX_1001/job/1234";
    let generic = "https://jobs.example.org/en/sites/CX_1001/job/55";
    let browser = MockBrowser::new()
        .with_page(
            LISTING,
            r#"<body>
                <a href="/en/sites/CX_1001/job/1234">CFO</a>
                <a href="/en/sites/CX_1001/job/55">Position</a>
            </body>"#,
        )
        .with_failing_url(short)
        .with_failing_url(generic);

    let jobs = scrape_jobs(&browser, &config()).await;

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].title(), "Position 1234");
    assert_eq!(jobs[1].title(), "Position 55");
    assert_eq!(
        browser.goto_calls(),
        vec![LISTING, short, LISTING, generic, LISTING]
    );
}

#[tokio::test]
async fn test_short_title_refined_from_detail_page() {
    let detail = "https://jobs.example.org/en/sites/CX_1001/job/77";
    let browser = MockBrowser::new()
        .with_page(
            LISTING,
            r#"<body><div><a href="/en/sites/CX_1001/job/77">Open</a></div></body>"#,
        )
        .with_page(
            detail,
            r#"<body>
                <h1>Director, Division of Mitigation and Adaptation</h1>
                <div><span>Location: Songdo, Incheon</span></div>
            </body>"#,
        );

    let jobs = scrape_jobs(&browser, &config()).await;

    assert_eq!(jobs.len(), 1);
    assert_eq!(
        jobs[0].title(),
        "Director, Division of Mitigation and Adaptation"
    );
    assert_eq!(jobs[0].location(), "Songdo, Incheon");
}

#[tokio::test]
async fn test_short_title_kept_when_detail_page_has_no_heading() {
    let detail = "https://jobs.example.org/en/sites/CX_1001/job/5";
    let browser = MockBrowser::new()
        .with_page(
            LISTING,
            r#"<body><a href="/en/sites/CX_1001/job/5">CFO</a></body>"#,
        )
        .with_page(detail, "<body><p>Loading...</p></body>");

    let jobs = scrape_jobs(&browser, &config()).await;

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title(), "CFO");
}

#[tokio::test]
async fn test_candidates_without_links_are_excluded() {
    let browser = MockBrowser::new().with_page(
        LISTING,
        r#"<body>
            <div data-automation-id="jobCard">
                <span class="job-title">Environmental Specialist</span>
                <span class="location">Remote</span>
            </div>
            <div data-automation-id="jobCard">
                <span class="job-title">Risk Management Officer</span>
                <a href="/postings/88">View</a>
                <span class="location">Incheon</span>
                <span class="category">Risk</span>
                <span class="posted-date">Mon, 03 Mar 2025 00:00:00 +0000</span>
            </div>
        </body>"#,
    );

    let jobs = scrape_jobs(&browser, &config()).await;

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title(), "Risk Management Officer");
    assert_eq!(jobs[0].link(), "https://jobs.example.org/postings/88");
    assert_eq!(jobs[0].location(), "Incheon");
    assert_eq!(jobs[0].department(), "Risk");
    assert_eq!(jobs[0].pub_date(), "Mon, 03 Mar 2025 00:00:00 +0000");
    assert_eq!(
        jobs[0].description(),
        "Risk Management Officer | Location: Incheon | Department: Risk"
    );
}

#[tokio::test]
async fn test_tab_click_reveals_listing() {
    let browser = MockBrowser::new()
        .with_page(LISTING, r#"<body><button>Staffs</button></body>"#)
        .with_page_after_click(
            LISTING,
            "Staffs",
            r#"<body><a href="/en/sites/CX_1001/job/3">Knowledge Management Analyst</a></body>"#,
        );

    let jobs = scrape_jobs(&browser, &config()).await;

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title(), "Knowledge Management Analyst");
}

#[tokio::test]
async fn test_empty_listing() {
    let browser = MockBrowser::new().with_page(LISTING, "<body><p>No openings</p></body>");

    let jobs = scrape_jobs(&browser, &config()).await;

    assert!(jobs.is_empty());
    assert_eq!(browser.close_count(), 1);
}

#[tokio::test]
async fn test_debug_snapshot_written() {
    let path = std::env::temp_dir().join(format!("gcf-snapshot-{}.html", uuid::Uuid::new_v4()));
    let markup = r#"<body><a href="/en/sites/CX_1001/job/1">Finance Officer</a></body>"#;
    let browser = MockBrowser::new().with_page(LISTING, markup);

    scrape_jobs(&browser, &config().with_debug_snapshot(&path)).await;

    let saved = std::fs::read_to_string(&path).unwrap();
    assert_eq!(saved, markup);
    std::fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn test_records_dumped_as_json() {
    let path = std::env::temp_dir().join(format!("gcf-records-{}.json", uuid::Uuid::new_v4()));
    let browser = MockBrowser::new().with_page(
        LISTING,
        r#"<body><div><a href="/en/sites/CX_1001/job/8">Adaptation Specialist</a><span>Remote</span></div></body>"#,
    );

    let jobs = scrape_jobs(&browser, &config().with_debug_records(&path)).await;

    let saved: Vec<JobRecord> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, jobs);
    assert_eq!(saved[0].location(), "Remote");
    std::fs::remove_file(&path).unwrap();
}
