// Re-export modules
pub mod browser;
pub mod config;
pub mod corpus;
pub mod normalize;
pub mod pipeline;
pub mod selectors;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{CrawlConfig, Subject};
pub use corpus::{Answer, Difficulty, ExtractedRecord};
pub use pipeline::CrawlSummary;

use anyhow::{Context, Result};
use url::Url;

use browser::WebDriverBrowser;

/// Main builder for crawling one subject's question bank.
///
/// Connects to a WebDriver session, walks the paginated catalog, and writes
/// the corpus plus sidecar assets under the output directory.
pub struct Crawl {
    config: CrawlConfig,
}

impl Crawl {
    /// Create a new Crawl builder for the given subject, with defaults for
    /// everything else.
    pub fn new(subject: Subject) -> Self {
        Self {
            config: CrawlConfig::new(subject),
        }
    }

    /// Create a builder from a fully formed configuration.
    pub fn from_config(config: CrawlConfig) -> Self {
        Self { config }
    }

    /// Set the number of result pages to walk.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the WebDriver server URL.
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Set the directory receiving the corpus file and assets.
    pub fn with_output_dir(mut self, dir: &str) -> Self {
        self.config.output_dir = dir.to_string();
        self
    }

    /// Run the crawl to completion.
    pub async fn run(self) -> Result<CrawlSummary> {
        let mut config = self.config;

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        Url::parse(&config.start_url).context("invalid start URL")?;

        let browser = WebDriverBrowser::connect(&config.webdriver_url).await?;
        let result = pipeline::run(&browser, &config).await;

        if let Err(e) = browser.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }

        result
    }
}
