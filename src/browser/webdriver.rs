use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::Value;

use super::Browser;

/// `Browser` implementation over a WebDriver session.
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Connects to the WebDriver instance at `webdriver_url`, falling back
    /// to the usual local driver ports if that fails.
    pub async fn connect(webdriver_url: &str) -> Result<Self> {
        match ClientBuilder::native().connect(webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                return Ok(Self { client });
            }
            Err(e) => {
                ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            }
        }

        // If we couldn't connect, try with common alternative URLs
        let fallback_urls = [
            "http://localhost:9515", // ChromeDriver default
            "http://localhost:4444", // Selenium / geckodriver default
            "http://127.0.0.1:4444", // Try with IP instead of localhost
        ];

        for url in fallback_urls.iter() {
            if *url == webdriver_url {
                continue; // Skip if it's the same as the one we already tried
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = ClientBuilder::native().connect(url).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(Self { client });
            }
        }

        bail!(
            "failed to connect to any WebDriver server; make sure one is running \
             or set the WEBDRIVER_URL environment variable"
        )
    }

    /// Closes the underlying session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await.context("closing WebDriver session")?;
        Ok(())
    }

    async fn find_first(&self, css: &str) -> Result<Option<Element>> {
        let mut elements = self
            .client
            .find_all(Locator::Css(css))
            .await
            .with_context(|| format!("finding elements for {css:?}"))?;
        if elements.is_empty() {
            Ok(None)
        } else {
            Ok(Some(elements.remove(0)))
        }
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn goto(&self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .with_context(|| format!("navigating to {url}"))
    }

    async fn wait_for(&self, css: &str, timeout: Duration) -> Result<()> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(css))
            .await
            .with_context(|| format!("waiting for {css:?}"))?;
        Ok(())
    }

    async fn click(&self, css: &str) -> Result<()> {
        let el = self
            .client
            .find(Locator::Css(css))
            .await
            .with_context(|| format!("locating {css:?}"))?;
        el.click().await.with_context(|| format!("clicking {css:?}"))?;
        Ok(())
    }

    async fn click_nth(&self, css: &str, index: usize) -> Result<()> {
        let elements = self
            .client
            .find_all(Locator::Css(css))
            .await
            .with_context(|| format!("finding elements for {css:?}"))?;
        let Some(el) = elements.get(index) else {
            bail!("no element at index {index} for {css:?}");
        };
        el.click()
            .await
            .with_context(|| format!("clicking {css:?}[{index}]"))?;
        Ok(())
    }

    async fn click_last(&self, css: &str) -> Result<()> {
        let elements = self
            .client
            .find_all(Locator::Css(css))
            .await
            .with_context(|| format!("finding elements for {css:?}"))?;
        let Some(el) = elements.last() else {
            bail!("no elements matching {css:?}");
        };
        el.click()
            .await
            .with_context(|| format!("clicking last {css:?}"))?;
        Ok(())
    }

    async fn select_value(&self, css: &str, value: &str) -> Result<()> {
        let el = self
            .client
            .find(Locator::Css(css))
            .await
            .with_context(|| format!("locating {css:?}"))?;
        el.select_by_value(value)
            .await
            .with_context(|| format!("selecting {value:?} on {css:?}"))?;
        Ok(())
    }

    async fn text(&self, css: &str) -> Result<Option<String>> {
        match self.find_first(css).await? {
            Some(el) => Ok(Some(
                el.text()
                    .await
                    .with_context(|| format!("reading text of {css:?}"))?,
            )),
            None => Ok(None),
        }
    }

    async fn texts(&self, css: &str) -> Result<Vec<String>> {
        let elements = self
            .client
            .find_all(Locator::Css(css))
            .await
            .with_context(|| format!("finding elements for {css:?}"))?;
        let mut out = Vec::with_capacity(elements.len());
        for el in elements {
            out.push(
                el.text()
                    .await
                    .with_context(|| format!("reading text of {css:?}"))?,
            );
        }
        Ok(out)
    }

    async fn inner_html(&self, css: &str) -> Result<Option<String>> {
        match self.find_first(css).await? {
            Some(el) => Ok(Some(
                el.html(true)
                    .await
                    .with_context(|| format!("reading inner HTML of {css:?}"))?,
            )),
            None => Ok(None),
        }
    }

    async fn outer_html(&self, css: &str) -> Result<Option<String>> {
        match self.find_first(css).await? {
            Some(el) => Ok(Some(
                el.html(false)
                    .await
                    .with_context(|| format!("reading outer HTML of {css:?}"))?,
            )),
            None => Ok(None),
        }
    }

    async fn inner_htmls(&self, css: &str) -> Result<Vec<String>> {
        let elements = self
            .client
            .find_all(Locator::Css(css))
            .await
            .with_context(|| format!("finding elements for {css:?}"))?;
        let mut out = Vec::with_capacity(elements.len());
        for el in elements {
            out.push(
                el.html(true)
                    .await
                    .with_context(|| format!("reading inner HTML of {css:?}"))?,
            );
        }
        Ok(out)
    }

    async fn attr(&self, css: &str, name: &str) -> Result<Option<String>> {
        match self.find_first(css).await? {
            Some(el) => el
                .attr(name)
                .await
                .with_context(|| format!("reading attr {name:?} of {css:?}")),
            None => Ok(None),
        }
    }

    async fn count(&self, css: &str) -> Result<usize> {
        let elements = self
            .client
            .find_all(Locator::Css(css))
            .await
            .with_context(|| format!("finding elements for {css:?}"))?;
        Ok(elements.len())
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        self.client
            .execute(script, args)
            .await
            .context("executing script in page")
    }
}
