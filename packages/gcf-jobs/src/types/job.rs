//! Job records produced by the extractor.

use serde::{Deserialize, Serialize};

/// Separator between the parts of a job description.
pub const DESCRIPTION_SEPARATOR: &str = " | ";

/// One job posting discovered on the listing page.
///
/// Construct through [`JobRecordBuilder`]; a record always has a non-empty
/// title and link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    title: String,
    link: String,
    location: String,
    department: String,
    pub_date: String,
    description: String,
}

impl JobRecord {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Absolute URL of the posting. Doubles as the feed item's guid.
    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Empty when unknown.
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Raw scraped posting date. Empty when unknown, and not guaranteed to
    /// be a valid RFC 822 date.
    pub fn pub_date(&self) -> &str {
        &self.pub_date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Accumulates fields for a [`JobRecord`] across the extraction steps.
#[derive(Debug, Clone, Default)]
pub struct JobRecordBuilder {
    link: String,
    title: String,
    location: Option<String>,
    department: String,
    pub_date: String,
}

impl JobRecordBuilder {
    /// Start a record for the given absolute link.
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the location only if none has been found yet.
    pub fn with_location_fallback(mut self, location: Option<String>) -> Self {
        if self.location.is_none() {
            self.location = location;
        }
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_pub_date(mut self, pub_date: impl Into<String>) -> Self {
        self.pub_date = pub_date.into();
        self
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Finish the record.
    ///
    /// Missing locations become `default_location`. Returns `None` when the
    /// title or link is empty.
    pub fn build(self, default_location: &str) -> Option<JobRecord> {
        let title = self.title.trim().to_string();
        let link = self.link.trim().to_string();
        if title.is_empty() || link.is_empty() {
            return None;
        }

        let location = self
            .location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| default_location.to_string());
        let description = describe(&title, &location, &self.department, default_location);

        Some(JobRecord {
            title,
            link,
            location,
            department: self.department,
            pub_date: self.pub_date,
            description,
        })
    }
}

/// Build the feed description for a posting.
///
/// The location is left out when it is the sentinel (compared
/// case-insensitively), the department when it is empty.
pub fn describe(title: &str, location: &str, department: &str, default_location: &str) -> String {
    let mut parts = vec![title.to_string()];
    if !location.eq_ignore_ascii_case(default_location) {
        parts.push(format!("Location: {}", location));
    }
    if !department.is_empty() {
        parts.push(format!("Department: {}", department));
    }
    parts.join(DESCRIPTION_SEPARATOR)
}

/// Title used when none could be found: `"<prefix> <last path segment>"`.
pub fn placeholder_title(prefix: &str, link: &str) -> String {
    let segment = link
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    format!("{} {}", prefix, segment)
}
