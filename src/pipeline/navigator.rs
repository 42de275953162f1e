use std::time::Duration;

use anyhow::{Context, Result};

use crate::browser::Browser;
use crate::config::CrawlConfig;
use crate::selectors;
use crate::utils::wait_until;

/// Poll interval for conditions the site does not signal.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One clickable reference to a question in the current result page.
/// Only valid while that page is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Site-assigned question identifier, taken from the view button text.
    pub id: String,
    /// Position of the entry on its page.
    pub index: usize,
}

/// Drives the search page: applies the filters once, then walks forward
/// through result pages. Not restartable mid-crawl; an interrupted run
/// starts over from the first page.
pub struct Navigator<'a> {
    browser: &'a dyn Browser,
    config: &'a CrawlConfig,
    page_no: usize,
}

impl<'a> Navigator<'a> {
    pub fn new(browser: &'a dyn Browser, config: &'a CrawlConfig) -> Self {
        Self {
            browser,
            config,
            page_no: 0,
        }
    }

    /// 1-based number of the page currently showing.
    pub fn page_number(&self) -> usize {
        self.page_no + 1
    }

    /// One-time setup before the first page: cascading filter dropdowns,
    /// consent banner, domain checkboxes, search submit, maximum page size.
    ///
    /// Any control failing to appear within its wait timeout is fatal; the
    /// run is meant to be restarted by the operator, not retried.
    pub async fn setup(&self) -> Result<()> {
        let browser = self.browser;
        let timeout = self.config.wait_timeout();

        browser.goto(&self.config.start_url).await?;

        browser
            .wait_for(selectors::ASSESSMENT_SELECT, timeout)
            .await
            .context("waiting for assessment dropdown")?;
        browser
            .select_value(selectors::ASSESSMENT_SELECT, &self.config.assessment_value)
            .await?;

        // The test dropdown only renders once the assessment choice has been
        // applied.
        browser
            .wait_for(selectors::TEST_SELECT, timeout)
            .await
            .context("waiting for test dropdown")?;
        browser
            .select_value(
                selectors::TEST_SELECT,
                self.config.subject.test_select_value(),
            )
            .await?;

        browser
            .wait_for(selectors::CONSENT_CLOSE, timeout)
            .await
            .context("waiting for consent banner")?;
        browser.click(selectors::CONSENT_CLOSE).await?;

        // The page reflows after the banner goes away with no signal to wait
        // on; give it a fixed settle delay.
        tokio::time::sleep(Duration::from_millis(self.config.consent_settle_ms)).await;

        let needed = self.config.domain_checkbox_count;
        wait_until(
            move || async move {
                browser
                    .count(selectors::DOMAIN_CHECKBOXES)
                    .await
                    .map(|n| n >= needed)
                    .unwrap_or(false)
            },
            timeout,
            POLL_INTERVAL,
        )
        .await
        .context("waiting for domain checkboxes")?;

        for i in 0..needed {
            browser
                .click_nth(selectors::DOMAIN_CHECKBOXES, i)
                .await
                .with_context(|| format!("ticking domain checkbox {i}"))?;
        }

        // Same story for the search button becoming clickable.
        tokio::time::sleep(Duration::from_millis(self.config.search_enable_ms)).await;
        browser.click(selectors::SEARCH_BUTTON).await?;

        browser
            .wait_for(selectors::RESULTS_TABLE, timeout)
            .await
            .context("waiting for results table")?;

        // The last page-size button is the largest option.
        browser
            .click_last(selectors::PAGE_SIZE_BUTTONS)
            .await
            .context("setting maximum page size")?;

        ::log::info!("Search configured for subject '{}'", self.config.subject.slug());
        Ok(())
    }

    /// Catalog entries on the page currently showing, in page order.
    pub async fn entries(&self) -> Result<Vec<CatalogEntry>> {
        let ids = self
            .browser
            .texts(selectors::VIEW_QUESTION_BUTTONS)
            .await
            .context("listing view-question buttons")?;

        Ok(ids
            .into_iter()
            .enumerate()
            .map(|(index, id)| CatalogEntry {
                id: id.trim().to_string(),
                index,
            })
            .collect())
    }

    /// Advances to the next result page. A missing next-page control means
    /// the configured page bound overshot the real corpus; that is fatal.
    pub async fn advance(&mut self) -> Result<()> {
        self.browser
            .click(selectors::NEXT_PAGE)
            .await
            .with_context(|| format!("advancing past page {}", self.page_number()))?;
        self.page_no += 1;
        Ok(())
    }
}
