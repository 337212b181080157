//! Tolerant readers over an untyped tree
//!
//! Each reader resolves a canonical key through the alias table and
//! converts whatever it finds into the declared type, or reports absence.

use super::defaults::{self, aliases_for};
use crate::parse::Tree;
use crate::record::Level;
use serde_json::Value;

/// The value under `key` or its first present alias. Null counts as absent.
pub fn lookup<'a>(obj: &'a Tree, key: &str) -> Option<&'a Value> {
    if let Some(value) = obj.get(key).filter(|v| !v.is_null()) {
        return Some(value);
    }
    aliases_for(key)
        .iter()
        .filter_map(|alias| obj.get(*alias))
        .find(|v| !v.is_null())
}

/// Strings as-is; numbers and booleans stringified; anything else absent.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Text under `key`, empty when absent.
pub fn text(obj: &Tree, key: &str) -> String {
    lookup(obj, key).and_then(scalar_text).unwrap_or_default()
}

/// Non-blank text under `key`.
pub fn non_blank_text(obj: &Tree, key: &str) -> Option<String> {
    lookup(obj, key)
        .and_then(scalar_text)
        .filter(|s| !s.trim().is_empty())
}

/// Scalar items of the array under `key`. Non-scalar items are skipped.
pub fn string_list(obj: &Tree, key: &str) -> Vec<String> {
    match lookup(obj, key) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    }
}

/// Object items of the array under `key`. Other items are skipped.
pub fn object_list<'a>(obj: &'a Tree, key: &str) -> Vec<&'a Tree> {
    match lookup(obj, key) {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    }
}

pub fn object<'a>(obj: &'a Tree, key: &str) -> Option<&'a Tree> {
    lookup(obj, key).and_then(Value::as_object)
}

/// Declared level under `key`; anything unrecognised is `Medium`.
pub fn level(obj: &Tree, key: &str) -> Level {
    lookup(obj, key)
        .and_then(scalar_text)
        .map(|s| Level::parse_lenient(&s))
        .unwrap_or_default()
}

/// A finite number, or a numeric string with an optional `%` suffix.
/// Returns the number and whether it carried `%`.
fn numeric(value: &Value) -> Option<(f64, bool)> {
    let (n, percent) = match value {
        Value::Number(n) => (n.as_f64()?, false),
        Value::String(s) => {
            let trimmed = s.trim();
            match trimmed.strip_suffix('%') {
                Some(stripped) => (stripped.trim().parse().ok()?, true),
                None => (trimmed.parse().ok()?, false),
            }
        }
        _ => return None,
    };
    n.is_finite().then_some((n, percent))
}

fn clamp_round(n: f64, (min, max): (i64, i64)) -> u8 {
    n.round().clamp(min as f64, max as f64) as u8
}

/// Integer in `range` read from `value`, or `None` when not numeric.
pub fn bounded_int(value: Option<&Value>, range: (i64, i64)) -> Option<u8> {
    value
        .and_then(numeric)
        .map(|(n, _)| clamp_round(n, range))
}

/// Confidence as a percentage. Fractions strictly between 0 and 1 are
/// proportions and get scaled.
pub fn scale_confidence(n: f64) -> u8 {
    if !n.is_finite() {
        return defaults::CONFIDENCE;
    }
    let scaled = if n > 0.0 && n < 1.0 { n * 100.0 } else { n };
    clamp_round(scaled, defaults::CONFIDENCE_RANGE)
}

/// Confidence under `key`, or `None` when absent or not numeric.
pub fn confidence(obj: &Tree, key: &str) -> Option<u8> {
    let (n, percent) = lookup(obj, key).and_then(numeric)?;
    if percent {
        Some(clamp_round(n, defaults::CONFIDENCE_RANGE))
    } else {
        Some(scale_confidence(n))
    }
}
