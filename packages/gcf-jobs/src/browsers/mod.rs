//! Browser implementations.
//!
//! - `WebDriverBrowser` - headless Chrome over WebDriver
//! - `MockBrowser` - canned markup, for tests

mod mock;
mod webdriver;

pub use mock::MockBrowser;
pub use webdriver::WebDriverBrowser;

pub use crate::traits::browser::Browser;
