//! RSS 2.0 feed generation.
//!
//! The document is written event by event with `quick-xml`, so the Atom
//! namespace is declared once on the root with the `atom` prefix and the
//! output only varies with the build timestamp.

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;
use tracing::info;

use crate::config::FeedConfig;
use crate::error::FeedResult;
use crate::types::job::JobRecord;

/// Namespace of the `atom:link rel="self"` element.
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// RFC 822 date layout used by RSS, always in UTC.
pub const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Format a timestamp the way RSS expects it.
pub fn rfc822(timestamp: DateTime<Utc>) -> String {
    timestamp.format(RFC822_FORMAT).to_string()
}

/// Render the feed for `jobs`, stamped with `built_at`.
pub fn render_feed(
    jobs: &[JobRecord],
    config: &FeedConfig,
    built_at: DateTime<Utc>,
) -> FeedResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:atom", ATOM_NAMESPACE));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", &config.title)?;
    text_element(&mut writer, "link", &config.link)?;
    text_element(&mut writer, "description", &config.description)?;
    text_element(&mut writer, "language", &config.language)?;

    let mut self_link = BytesStart::new("atom:link");
    self_link.push_attribute(("href", config.self_link.as_str()));
    self_link.push_attribute(("rel", "self"));
    self_link.push_attribute(("type", "application/rss+xml"));
    writer.write_event(Event::Empty(self_link))?;

    text_element(&mut writer, "lastBuildDate", &rfc822(built_at))?;

    for job in jobs {
        write_item(&mut writer, job)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let xml = String::from_utf8(writer.into_inner())?;
    Ok(strip_blank_lines(&xml))
}

/// Render the feed and write it to `config.output_path`, replacing any
/// previous file.
pub async fn write_feed(jobs: &[JobRecord], config: &FeedConfig) -> FeedResult<()> {
    let xml = render_feed(jobs, config, Utc::now())?;
    tokio::fs::write(&config.output_path, xml.as_bytes()).await?;

    info!(
        path = %config.output_path.display(),
        items = jobs.len(),
        "[SUCCESS] RSS feed generated"
    );
    Ok(())
}

fn write_item<W: Write>(writer: &mut Writer<W>, job: &JobRecord) -> FeedResult<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;

    text_element(writer, "title", job.title())?;
    text_element(writer, "link", job.link())?;
    text_element(writer, "description", job.description())?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "true"));
    writer.write_event(Event::Start(guid))?;
    writer.write_event(Event::Text(BytesText::new(job.link())))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;

    // Scraped dates are passed through untouched, even if not RFC 822.
    if !job.pub_date().is_empty() {
        text_element(writer, "pubDate", job.pub_date())?;
    }

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> FeedResult<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn strip_blank_lines(xml: &str) -> String {
    xml.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
