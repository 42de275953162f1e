use anyhow::Result;
use clap::{Parser, ValueEnum};
use qbank_scrape::{CrawlConfig, Subject};

#[derive(Parser, Debug)]
#[command(name = "qbank-scrape")]
#[command(about = "Crawls a question bank and extracts a question corpus")]
#[command(version)]
pub struct Args {
    /// Subject to crawl
    #[arg(value_enum)]
    pub subject: SubjectArg,

    /// Load settings from a JSON config file; flags below still override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory for the corpus file and sidecar assets
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Number of result pages to walk
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// WebDriver server URL
    #[arg(long)]
    pub webdriver_url: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SubjectArg {
    Math,
    ReadingWriting,
}

/// Convert from CLI argument subject to internal subject type
pub fn convert_subject(arg: SubjectArg) -> Subject {
    match arg {
        SubjectArg::Math => Subject::Math,
        SubjectArg::ReadingWriting => Subject::ReadingWriting,
    }
}

impl Args {
    /// Build the crawl configuration: config file first if given, then
    /// command-line overrides on top.
    pub fn to_config(&self) -> Result<CrawlConfig> {
        let mut config = match &self.config {
            Some(path) => CrawlConfig::from_file(path)?,
            None => CrawlConfig::new(convert_subject(self.subject)),
        };
        config.subject = convert_subject(self.subject);

        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(url) = &self.webdriver_url {
            config.webdriver_url = url.clone();
        }
        Ok(config)
    }
}
