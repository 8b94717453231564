//! Core trait abstractions.

pub mod browser;

pub use browser::{Browser, SCROLL_TO_BOTTOM, SCROLL_TO_TOP};
