//! Data types for scraped postings.

pub mod job;

pub use job::{describe, placeholder_title, JobRecord, JobRecordBuilder};
