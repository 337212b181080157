//! Boundary extraction: isolate the most plausible JSON object in raw text
//!
//! Models wrap their JSON in markdown fences or surround it with prose.
//! Fence markers are stripped, then the span from the first `{` to the
//! last `}` is taken as the candidate.

use regex::Regex;
use std::sync::LazyLock;

/// Opening or closing code fence, with an optional language tag.
static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+-]*").expect("fence pattern is valid"));

/// Text that starts with `{` and ends with `}`. Not necessarily valid JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateText(String);

impl CandidateText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Result of boundary extraction. `NoBoundary` is a normal outcome, not an
/// error: it routes straight to manual field extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary {
    Candidate(CandidateText),
    NoBoundary,
}

/// Locate the candidate JSON object in `text`.
pub fn extract_candidate(text: &str) -> Boundary {
    let unfenced = FENCE.replace_all(text, "");
    let trimmed = unfenced.trim();

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            Boundary::Candidate(CandidateText(trimmed[start..=end].to_string()))
        }
        _ => Boundary::NoBoundary,
    }
}
