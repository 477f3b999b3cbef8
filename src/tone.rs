//! Summarization focus selected by the user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The focus the brief is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    #[serde(rename = "Executive Summary")]
    ExecutiveSummary,
    #[serde(rename = "Litigation Focus")]
    LitigationFocus,
    #[serde(rename = "Compliance Highlights")]
    ComplianceHighlights,
    #[serde(rename = "Plain English")]
    PlainEnglish,
}

impl Tone {
    /// All tones in display order.
    pub const ALL: [Tone; 4] = [
        Tone::ExecutiveSummary,
        Tone::LitigationFocus,
        Tone::ComplianceHighlights,
        Tone::PlainEnglish,
    ];

    /// Human-readable label, also used as the "current focus" in the prompt.
    pub fn label(self) -> &'static str {
        match self {
            Tone::ExecutiveSummary => "Executive Summary",
            Tone::LitigationFocus => "Litigation Focus",
            Tone::ComplianceHighlights => "Compliance Highlights",
            Tone::PlainEnglish => "Plain English",
        }
    }

    /// Extra instruction appended to the system prompt for this tone.
    pub fn instruction_clause(self) -> Option<&'static str> {
        match self {
            Tone::PlainEnglish => Some(
                "Plain English is selected: avoid legal jargon and use common vocabulary, \
                 while keeping the same brevity and the same length constraint.",
            ),
            Tone::ExecutiveSummary | Tone::LitigationFocus | Tone::ComplianceHighlights => None,
        }
    }

    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no known tone.
#[derive(Debug, thiserror::Error)]
#[error("unknown tone '{0}' (expected executive, litigation, compliance or plain-english)")]
pub struct ParseToneError(String);

impl FromStr for Tone {
    type Err = ParseToneError;

    /// Accepts the display label or a short kebab-case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "executive" | "executive-summary" => Ok(Tone::ExecutiveSummary),
            "litigation" | "litigation-focus" => Ok(Tone::LitigationFocus),
            "compliance" | "compliance-highlights" => Ok(Tone::ComplianceHighlights),
            "plain" | "plain-english" => Ok(Tone::PlainEnglish),
            _ => Err(ParseToneError(s.to_string())),
        }
    }
}
