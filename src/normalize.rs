//! Pure string transforms over raw extracted HTML fragments.
//!
//! Fragments leave the extractor carrying two kinds of noise: math-rendering
//! runtime containers around every formula, and literal newlines plus
//! blank-fill placeholder tokens from the source markup. Everything here is
//! idempotent so fragments can be re-normalized safely.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};

/// Tokens the source markup leaves behind in fill-in-the-blank questions.
const PLACEHOLDER_TOKENS: &[&str] = &["blank", "<br>"];

fn math_container_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<mjx-container\b.*?</mjx-container>").unwrap())
}

/// Replaces every math-rendering container with the plain `<svg>` it wraps.
///
/// The stored fragment then renders without a math runtime. Containers with
/// no embedded svg are left alone, matching what the site produces for
/// formula-free items.
pub fn rewrite_math(html: &str) -> String {
    math_container_regex()
        .replace_all(html, |caps: &regex::Captures| {
            let container = caps.get(0).unwrap().as_str();
            inner_svg(container).unwrap_or_else(|| container.to_string())
        })
        .into_owned()
}

/// Extracts the outer HTML of the first `<svg>` inside a fragment.
fn inner_svg(fragment: &str) -> Option<String> {
    let doc = Html::parse_fragment(fragment);
    let selector = Selector::parse("svg").unwrap();
    doc.select(&selector).next().map(|el| el.html())
}

/// Normalizes a question-body fragment: math rewrite, newline removal, and
/// placeholder-token stripping.
pub fn normalize_question(html: &str) -> String {
    let html = rewrite_math(html);
    let html = html.replace('\n', "");
    strip_placeholder_tokens(&html)
}

/// Normalizes an answer-choice fragment. Placeholder tokens stay: a choice
/// can legitimately contain the word "blank".
pub fn normalize_choice(html: &str) -> String {
    rewrite_math(html).replace('\n', "")
}

/// Normalizes a prompt or explanation fragment, where a newline marks a real
/// line break and becomes `<br>`.
pub fn normalize_block(html: &str) -> String {
    rewrite_math(html).replace('\n', "<br>")
}

/// Removes placeholder tokens until none remain.
///
/// A single replace pass is not enough: deleting a token can splice a new
/// occurrence together out of its neighbors.
fn strip_placeholder_tokens(html: &str) -> String {
    let mut out = html.to_string();
    loop {
        let mut changed = false;
        for token in PLACEHOLDER_TOKENS {
            if out.contains(token) {
                out = out.replace(token, "");
                changed = true;
            }
        }
        if !changed {
            return out;
        }
    }
}
