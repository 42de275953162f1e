pub mod webdriver;

pub use webdriver::WebDriverBrowser;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Capability interface over the rendered page.
///
/// The navigator and extractor only ever touch the page through this trait,
/// so the automation driver is swappable without touching extraction logic.
/// All selectors are CSS.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Navigate the session to a URL.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Wait until an element matching the selector exists, up to `timeout`.
    async fn wait_for(&self, css: &str, timeout: Duration) -> Result<()>;

    /// Click the first element matching the selector.
    async fn click(&self, css: &str) -> Result<()>;

    /// Click the element at `index` among those matching the selector.
    async fn click_nth(&self, css: &str, index: usize) -> Result<()>;

    /// Click the last element matching the selector.
    async fn click_last(&self, css: &str) -> Result<()>;

    /// Select an option by value on a `<select>` element.
    async fn select_value(&self, css: &str, value: &str) -> Result<()>;

    /// Visible text of the first matching element, if one exists.
    async fn text(&self, css: &str) -> Result<Option<String>>;

    /// Visible text of every matching element, in document order.
    async fn texts(&self, css: &str) -> Result<Vec<String>>;

    /// Inner HTML of the first matching element, if one exists.
    async fn inner_html(&self, css: &str) -> Result<Option<String>>;

    /// Outer HTML of the first matching element, if one exists.
    async fn outer_html(&self, css: &str) -> Result<Option<String>>;

    /// Inner HTML of every matching element, in document order.
    async fn inner_htmls(&self, css: &str) -> Result<Vec<String>>;

    /// Attribute value on the first matching element.
    async fn attr(&self, css: &str, name: &str) -> Result<Option<String>>;

    /// Number of elements matching the selector.
    async fn count(&self, css: &str) -> Result<usize>;

    /// Run a script in the page, with `arguments[n]` bound to `args`.
    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value>;
}
