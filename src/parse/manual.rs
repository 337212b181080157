//! Manual field extraction, the last resort when no structured parse succeeds
//!
//! Scans the original raw text with tolerant patterns for the three
//! highest-value scalars. Anything not found gets a fixed, content-free
//! placeholder; nothing is ever inferred from the document itself.

use crate::normalize::coerce::scale_confidence;
use crate::normalize::defaults;
use regex::Regex;
use std::sync::LazyLock;

/// Scalars recovered by pattern scanning, with placeholders for the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialFields {
    pub summary: String,
    pub document_type: String,
    pub confidence: u8,
    /// Canonical names of the fields that hold placeholders.
    pub placeholders: Vec<&'static str>,
}

impl PartialFields {
    /// All placeholders; used when there is nothing to scan.
    pub fn placeholders_only() -> Self {
        Self {
            summary: defaults::SUMMARY.to_string(),
            document_type: defaults::DOCUMENT_TYPE.to_string(),
            confidence: defaults::CONFIDENCE,
            placeholders: defaults::MANUAL_FIELDS.to_vec(),
        }
    }
}

/// Build the string-value patterns for a key, most structured first:
/// double-quoted value (closing quote optional), single-quoted value,
/// then a prose `Key: value` line.
fn string_patterns(key: &str) -> Vec<Regex> {
    [
        format!(r#"(?i)["']?\b{key}\b["']?\s*[:=]\s*"((?:[^"\\\r\n]|\\.)*)"#),
        format!(r#"(?i)["']?\b{key}\b["']?\s*[:=]\s*'([^'\r\n]*)"#),
        format!(r#"(?im)^[\s>*#-]*\b{key}\b\**[ \t]*:\**[ \t]*([^\s"'{{\[].*)$"#),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("manual extraction pattern is valid"))
    .collect()
}

static SUMMARY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| string_patterns("summary"));

static DOCUMENT_TYPE_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| string_patterns(r"document[_\s]?type"));

static CONFIDENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)["']?\bconfidence(?:[_\s]?score)?\b["']?\**\s*[:=]\s*\**["']?(\d{1,3}(?:\.\d+)?)\s*(%)?"#,
    )
    .expect("confidence pattern is valid")
});

/// Scan `raw` for `summary`, `documentType` and `confidence`.
pub fn extract_fields(raw: &str) -> PartialFields {
    let mut placeholders = Vec::new();

    let summary = first_string_match(&SUMMARY_PATTERNS, raw).unwrap_or_else(|| {
        placeholders.push("summary");
        defaults::SUMMARY.to_string()
    });

    let document_type = first_string_match(&DOCUMENT_TYPE_PATTERNS, raw).unwrap_or_else(|| {
        placeholders.push("documentType");
        defaults::DOCUMENT_TYPE.to_string()
    });

    let confidence = confidence_match(raw).unwrap_or_else(|| {
        placeholders.push("confidence");
        defaults::CONFIDENCE
    });

    PartialFields {
        summary,
        document_type,
        confidence,
        placeholders,
    }
}

fn first_string_match(patterns: &[Regex], raw: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures_iter(raw)
            .filter_map(|caps| caps.get(1))
            .map(|m| clean_value(m.as_str()))
            .find(|value| !value.is_empty())
    })
}

/// Decode JSON escapes when the capture is a valid string body, then strip
/// markdown emphasis and a trailing comma left over from prose lines.
fn clean_value(captured: &str) -> String {
    let decoded = serde_json::from_str::<String>(&format!("\"{}\"", captured))
        .unwrap_or_else(|_| captured.to_string());
    decoded
        .trim()
        .trim_matches('*')
        .trim_end_matches(',')
        .trim()
        .to_string()
}

fn confidence_match(raw: &str) -> Option<u8> {
    let caps = CONFIDENCE_PATTERN.captures(raw)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    if caps.get(2).is_some() {
        return Some(value.round().clamp(0.0, 100.0) as u8);
    }
    Some(scale_confidence(value))
}
