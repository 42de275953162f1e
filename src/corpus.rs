use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Difficulty label the site attaches to an item, when it attaches one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parses the difficulty glyph's aria-label. Unknown labels map to None
    /// rather than failing the item.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Resolved answer for an item.
///
/// Multiple-choice items store a 0-based index into `choices`; free-response
/// items store the answer text taken from the rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Index(usize),
    Text(String),
}

/// One fully extracted question, the unit of persistence.
///
/// `prompt`, `question`, `choices` and `explanation` hold normalized HTML
/// fragments that render without the site's math runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Site-assigned identifier; also names the item's sidecar asset.
    pub id: String,
    /// Stimulus shown above the question, if the item has one.
    pub prompt: Option<String>,
    pub question: String,
    /// Top-level category label.
    pub domain: String,
    /// Sub-category label within `domain`.
    pub skill: String,
    pub difficulty: Option<Difficulty>,
    /// Empty for free-response items.
    pub choices: Vec<String>,
    pub answer: Answer,
    /// Rationale markup; may be empty.
    pub explanation: String,
}

impl ExtractedRecord {
    /// True when `answer` is resolvable against `choices`.
    pub fn answer_is_valid(&self) -> bool {
        match &self.answer {
            Answer::Index(i) => *i < self.choices.len(),
            Answer::Text(_) => self.choices.is_empty(),
        }
    }
}

/// Accumulates records for one subject and persists them in a single
/// terminal write.
///
/// There is deliberately no incremental persistence: corpora are small and a
/// failed run is re-run from scratch.
pub struct CorpusWriter {
    path: PathBuf,
    records: Vec<ExtractedRecord>,
}

impl CorpusWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Appends a record. Order of appends is the order of the output array.
    pub fn append(&mut self, record: ExtractedRecord) {
        ::log::debug!("Corpus append: {} ({} total)", record.id, self.records.len() + 1);
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[ExtractedRecord] {
        &self.records
    }

    /// Serializes the accumulated records as one pretty-printed JSON array,
    /// overwriting any previous file at the output path.
    pub fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)
            .context("serializing corpus to JSON")?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating output directory {}", parent.display()))?;
            }
        }

        fs::write(&self.path, json)
            .with_context(|| format!("writing corpus to {}", self.path.display()))?;

        ::log::info!(
            "Wrote {} records to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }
}
