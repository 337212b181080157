//! Strict parse of a candidate into an untyped tree

use super::boundary::CandidateText;
use serde_json::{Map, Value};
use thiserror::Error;

/// Untyped key/value tree produced by a successful parse.
pub type Tree = Map<String, Value>;

/// A strict parse failure. The position is for logs only and is never
/// placed in a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StrictParseError {
    /// 1-based line, 0 when unknown
    pub line: usize,
    /// 1-based column, 0 when unknown
    pub column: usize,
    pub message: String,
}

impl From<serde_json::Error> for StrictParseError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Parse `candidate` as a JSON object.
pub fn parse_strict(candidate: &CandidateText) -> Result<Tree, StrictParseError> {
    match serde_json::from_str::<Value>(candidate.as_str())? {
        Value::Object(tree) => Ok(tree),
        _ => Err(StrictParseError {
            line: 1,
            column: 1,
            message: "expected a JSON object".to_string(),
        }),
    }
}
