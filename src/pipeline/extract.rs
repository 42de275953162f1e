use std::fmt;

use anyhow::{Context, Result};

use crate::browser::Browser;
use crate::config::CrawlConfig;
use crate::corpus::{Answer, Difficulty, ExtractedRecord};
use crate::normalize;
use crate::pipeline::assets;
use crate::pipeline::navigator::CatalogEntry;
use crate::selectors;

/// Offset of the correct-choice letter in the first rationale sentence,
/// whose template is "Choice A is the best answer ...".
///
/// Fragile to any rewording of that template on the site; an unknown
/// character at the offset skips the item rather than guessing.
const RATIONALE_LETTER_OFFSET: usize = 7;

/// Letters a multiple-choice rationale can name.
const CHOICE_LETTERS: &str = "ABCD";

/// Template prefix of a free-response rationale sentence.
const ANSWER_TEXT_PREFIX: &str = "The correct answer is";

/// Why an item was excluded from the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The mandatory question container was missing or empty.
    MissingQuestion,
    /// No valid choice letter could be resolved from the rationale.
    UnresolvedAnswer,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingQuestion => write!(f, "missing question container"),
            SkipReason::UnresolvedAnswer => write!(f, "unresolvable correct answer"),
        }
    }
}

/// Result of processing one catalog entry.
#[derive(Debug)]
pub enum ItemOutcome {
    Extracted(ExtractedRecord),
    Skipped(SkipReason),
}

/// Opens the entry's detail modal, extracts a record from it, and closes
/// the modal again whether or not extraction succeeded, so the result list
/// is back in a known state for the next entry.
pub async fn extract_item(
    browser: &dyn Browser,
    entry: &CatalogEntry,
    config: &CrawlConfig,
) -> Result<ItemOutcome> {
    browser
        .click_nth(selectors::VIEW_QUESTION_BUTTONS, entry.index)
        .await
        .with_context(|| format!("opening detail modal for {}", entry.id))?;
    browser
        .wait_for(selectors::QUESTION_INFO, config.wait_timeout())
        .await
        .with_context(|| format!("waiting for modal content of {}", entry.id))?;

    let outcome = read_fields(browser, entry, config).await;

    if let Err(e) = browser.click(selectors::MODAL_CLOSE).await {
        match outcome {
            // A modal stuck open would poison every following entry.
            Ok(_) => {
                return Err(e).with_context(|| format!("closing detail modal for {}", entry.id));
            }
            Err(_) => ::log::warn!("Failed to close modal for {}: {}", entry.id, e),
        }
    }

    outcome
}

/// Reads the structured fields from the open modal.
async fn read_fields(
    browser: &dyn Browser,
    entry: &CatalogEntry,
    config: &CrawlConfig,
) -> Result<ItemOutcome> {
    // Asset extraction first: it swaps the figure node in the live DOM, and
    // the swap has to be visible to the HTML reads below.
    assets::extract_figure(browser, &entry.id, config).await?;

    let Some(question) = browser.outer_html(selectors::QUESTION).await? else {
        return Ok(ItemOutcome::Skipped(SkipReason::MissingQuestion));
    };
    let question = normalize::normalize_question(&question);
    if question.is_empty() {
        return Ok(ItemOutcome::Skipped(SkipReason::MissingQuestion));
    }

    // Domain and skill sit at fixed positions among the label cells.
    let labels = browser.texts(selectors::LABEL_CELLS).await?;
    let domain = labels.get(2).map(|s| s.trim().to_string()).unwrap_or_default();
    let skill = labels.get(3).map(|s| s.trim().to_string()).unwrap_or_default();

    let difficulty = browser
        .attr(selectors::DIFFICULTY, "aria-label")
        .await?
        .and_then(|label| Difficulty::from_label(&label));

    // An item with an empty prompt container has no stimulus; that is a
    // normal shape, not a failure.
    let prompt = match browser.inner_html(selectors::PROMPT).await? {
        Some(inner) if !inner.trim().is_empty() => browser
            .outer_html(selectors::PROMPT)
            .await?
            .map(|html| normalize::normalize_block(&html)),
        _ => None,
    };

    let choices: Vec<String> = browser
        .inner_htmls(selectors::CHOICE_ITEMS)
        .await?
        .iter()
        .map(|html| normalize::normalize_choice(html))
        .collect();

    let rationale = browser.texts(selectors::RATIONALE_PARAGRAPHS).await?;
    let first_sentence = rationale.first().map(String::as_str).unwrap_or("");

    let answer = if choices.is_empty() {
        // Free-response item; the rationale states the answer instead of
        // naming a choice letter.
        Answer::Text(free_response_answer(first_sentence))
    } else {
        match answer_letter_index(first_sentence) {
            Some(index) if index < choices.len() => Answer::Index(index),
            _ => return Ok(ItemOutcome::Skipped(SkipReason::UnresolvedAnswer)),
        }
    };

    let explanation = browser
        .inner_html(selectors::RATIONALE_BODY)
        .await?
        .map(|html| normalize::normalize_block(&html))
        .unwrap_or_default();

    Ok(ItemOutcome::Extracted(ExtractedRecord {
        id: entry.id.clone(),
        prompt,
        question,
        domain,
        skill,
        difficulty,
        choices,
        answer,
        explanation,
    }))
}

/// Resolves the 0-based choice index named by a rationale sentence, if the
/// character at the template offset is a known choice letter.
pub fn answer_letter_index(rationale: &str) -> Option<usize> {
    let letter = rationale.chars().nth(RATIONALE_LETTER_OFFSET)?;
    CHOICE_LETTERS.find(letter)
}

/// Answer text for a free-response item, taken from the rationale sentence
/// with its template prefix and trailing period stripped.
pub fn free_response_answer(rationale: &str) -> String {
    let text = rationale.trim();
    let text = text
        .strip_prefix(ANSWER_TEXT_PREFIX)
        .map(str::trim_start)
        .unwrap_or(text);

    // Keep only the first sentence; later sentences are explanation.
    let text = match text.find(". ") {
        Some(pos) => &text[..pos],
        None => text,
    };
    text.trim_end_matches('.').trim().to_string()
}
