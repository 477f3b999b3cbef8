//! SummaryResult - the record produced by one successful summarization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Target length of a one-page brief, in characters.
pub const TARGET_CHARS: usize = 600;
/// Accepted deviation from [`TARGET_CHARS`].
pub const TOLERANCE_CHARS: usize = 100;

/// The outcome of a successful summarization.
///
/// Created once per successful call and never mutated; a new summarization
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    /// The document text the summary was generated from
    pub original_text: String,
    /// The generated brief
    pub summary: String,
    /// Creation time in epoch milliseconds
    pub timestamp: i64,
}

impl SummaryResult {
    /// Create a result stamped with the current time
    pub fn new(original_text: String, summary: String) -> Self {
        Self {
            original_text,
            summary,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.summary.chars().count()
    }

    pub fn word_count(&self) -> usize {
        self.summary.split_whitespace().count()
    }

    /// Whether the brief landed inside the requested length window.
    ///
    /// Informational only; nothing rejects or retries a brief outside it.
    pub fn within_target(&self) -> bool {
        self.char_count().abs_diff(TARGET_CHARS) <= TOLERANCE_CHARS
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}
