use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::sanitize_filename;

/// Subject whose question bank is crawled. Each subject gets its own corpus
/// file and assets directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
    Math,
    ReadingWriting,
}

impl Subject {
    /// Value for the test-type dropdown on the search page.
    pub fn test_select_value(&self) -> &'static str {
        match self {
            Subject::ReadingWriting => "1",
            Subject::Math => "2",
        }
    }

    /// Short name used in output paths.
    pub fn slug(&self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::ReadingWriting => "reading",
        }
    }
}

/// Configuration for one crawl run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Subject to crawl.
    pub subject: Subject,

    /// Search page of the question bank.
    #[serde(default = "default_start_url")]
    pub start_url: String,

    /// URL for the WebDriver instance.
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Directory receiving the corpus file and the assets subdirectory.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Number of result pages to walk. The bound is configured, not
    /// discovered; running past the real page count aborts on the missing
    /// next-page control.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Value for the assessment-type dropdown.
    #[serde(default = "default_assessment_value")]
    pub assessment_value: String,

    /// Number of domain checkboxes to tick before searching.
    #[serde(default = "default_domain_checkbox_count")]
    pub domain_checkbox_count: usize,

    /// Settle delay after dismissing the consent banner, in milliseconds.
    /// The site gives no signal for this transition.
    #[serde(default = "default_consent_settle_ms")]
    pub consent_settle_ms: u64,

    /// Delay for the search button to become clickable after the checkboxes
    /// are ticked, in milliseconds. Also unsignalled by the site.
    #[serde(default = "default_search_enable_ms")]
    pub search_enable_ms: u64,

    /// Timeout for each individual DOM-readiness wait, in seconds.
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,
}

fn default_start_url() -> String {
    "https://satsuitequestionbank.collegeboard.org/digital/search".to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_max_pages() -> usize {
    31
}

fn default_assessment_value() -> String {
    "99".to_string()
}

fn default_domain_checkbox_count() -> usize {
    4
}

fn default_consent_settle_ms() -> u64 {
    2000
}

fn default_search_enable_ms() -> u64 {
    1000
}

fn default_wait_timeout_secs() -> u64 {
    10
}

impl CrawlConfig {
    /// Create a new configuration with default values
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            start_url: default_start_url(),
            webdriver_url: default_webdriver_url(),
            output_dir: default_output_dir(),
            max_pages: default_max_pages(),
            assessment_value: default_assessment_value(),
            domain_checkbox_count: default_domain_checkbox_count(),
            consent_settle_ms: default_consent_settle_ms(),
            search_enable_ms: default_search_enable_ms(),
            wait_timeout_secs: default_wait_timeout_secs(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path.as_ref())
            .with_context(|| format!("opening config file {}", path.as_ref().display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .context("reading config file")?;

        let config: Self = serde_json::from_str(&contents).context("parsing config JSON")?;
        Ok(config)
    }

    /// Path the corpus is flushed to.
    pub fn corpus_path(&self) -> PathBuf {
        Path::new(&self.output_dir).join(format!("{}-questions.json", self.subject.slug()))
    }

    /// Directory sidecar assets are written into.
    pub fn assets_dir(&self) -> PathBuf {
        Path::new(&self.output_dir)
            .join("stimulus_images")
            .join(self.subject.slug())
    }

    /// Relative path embedded into a record's markup for its sidecar asset.
    pub fn asset_reference(&self, id: &str) -> String {
        format!(
            "stimulus_images/{}/{}.svg",
            self.subject.slug(),
            sanitize_filename(id)
        )
    }

    /// File the sidecar asset for `id` is written to.
    pub fn asset_path(&self, id: &str) -> PathBuf {
        self.assets_dir()
            .join(format!("{}.svg", sanitize_filename(id)))
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_target_site_constants() {
        let config = CrawlConfig::new(Subject::Math);
        assert_eq!(config.assessment_value, "99");
        assert_eq!(config.domain_checkbox_count, 4);
        assert_eq!(config.max_pages, 31);
        assert_eq!(config.consent_settle_ms, 2000);
        assert_eq!(config.search_enable_ms, 1000);
        assert!(config.start_url.contains("satsuitequestionbank"));
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: CrawlConfig =
            serde_json::from_str(r#"{ "subject": "reading-writing", "max_pages": 2 }"#).unwrap();
        assert_eq!(config.subject, Subject::ReadingWriting);
        assert_eq!(config.max_pages, 2);
        assert_eq!(config.webdriver_url, "http://localhost:4444");
    }

    #[test]
    fn per_subject_paths() {
        let mut config = CrawlConfig::new(Subject::Math);
        config.output_dir = "out".to_string();

        assert_eq!(
            config.corpus_path(),
            PathBuf::from("out/math-questions.json")
        );
        assert_eq!(
            config.asset_path("abc123"),
            PathBuf::from("out/stimulus_images/math/abc123.svg")
        );
        assert_eq!(
            config.asset_reference("abc123"),
            "stimulus_images/math/abc123.svg"
        );

        let config = CrawlConfig::new(Subject::ReadingWriting);
        assert_eq!(
            config.corpus_path(),
            PathBuf::from("./reading-questions.json")
        );
    }

    #[test]
    fn subject_select_values() {
        assert_eq!(Subject::ReadingWriting.test_select_value(), "1");
        assert_eq!(Subject::Math.test_select_value(), "2");
    }
}
