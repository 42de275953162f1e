pub mod assets;
pub mod extract;
pub mod navigator;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};

use crate::browser::Browser;
use crate::config::CrawlConfig;
use crate::corpus::CorpusWriter;
use extract::ItemOutcome;
use navigator::Navigator;

/// Counts for one completed crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages: usize,
    pub extracted: usize,
    pub skipped: usize,
}

/// Runs the whole crawl: one-time search setup, then page by page, entry by
/// entry, strictly sequentially, with a single corpus flush at the end.
///
/// Per-item failures are skips and the crawl keeps going; everything else
/// propagates and aborts the run with nothing persisted.
pub async fn run(browser: &dyn Browser, config: &CrawlConfig) -> Result<CrawlSummary> {
    let subject = config.subject.slug();
    let mut nav = Navigator::new(browser, config);
    nav.setup().await.context("setting up search page")?;

    let mut corpus = CorpusWriter::new(config.corpus_path());
    let mut skipped = 0usize;

    for page_no in 0..config.max_pages {
        let entries = nav.entries().await?;
        ::log::info!(
            "[{}] page {}/{}: {} entries",
            subject,
            page_no + 1,
            config.max_pages,
            entries.len()
        );

        for entry in &entries {
            ::log::info!(
                "[{}] page {} item {} id {}",
                subject,
                page_no + 1,
                entry.index,
                entry.id
            );

            match extract::extract_item(browser, entry, config).await? {
                ItemOutcome::Extracted(record) => corpus.append(record),
                ItemOutcome::Skipped(reason) => {
                    skipped += 1;
                    ::log::warn!(
                        "Skipping {} (page {}, item {}): {}",
                        entry.id,
                        page_no + 1,
                        entry.index,
                        reason
                    );
                }
            }
        }

        if page_no + 1 < config.max_pages {
            nav.advance().await?;
        }
    }

    let extracted = corpus.len();
    corpus.flush().context("flushing corpus")?;

    Ok(CrawlSummary {
        pages: config.max_pages,
        extracted,
        skipped,
    })
}
