//! The parse cascade: boundary → strict → repair → manual
//!
//! Every stage is a pure function over the raw text. Failures at one stage
//! route to the next and are recorded as diagnostics; the cascade itself
//! never fails.

pub mod boundary;
pub mod manual;
pub mod repair;
pub mod strict;

pub use boundary::{extract_candidate, Boundary, CandidateText};
pub use manual::{extract_fields, PartialFields};
pub use repair::{repair, RepairReport, RepairRule, RULES};
pub use strict::{parse_strict, StrictParseError, Tree};

use crate::record::ParseStrategy;
use thiserror::Error;

/// How the raw text was turned into data. Exactly one per run.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The candidate parsed as-is.
    Strict(Tree),
    /// The candidate parsed after the named repair rules ran.
    Repaired {
        tree: Tree,
        applied_rules: Vec<&'static str>,
    },
    /// No structured parse; scalars recovered by pattern scan.
    Manual(PartialFields),
    /// Nothing to work with (empty or whitespace-only text).
    Unrecoverable,
}

impl ParseOutcome {
    pub fn strategy(&self) -> ParseStrategy {
        match self {
            ParseOutcome::Strict(_) => ParseStrategy::Strict,
            ParseOutcome::Repaired { .. } => ParseStrategy::Repaired,
            ParseOutcome::Manual(_) => ParseStrategy::Manual,
            ParseOutcome::Unrecoverable => ParseStrategy::Unrecoverable,
        }
    }

    /// Names of the repair rules that produced the tree, if any.
    pub fn applied_rules(&self) -> &[&'static str] {
        match self {
            ParseOutcome::Repaired { applied_rules, .. } => applied_rules,
            _ => &[],
        }
    }

    /// The parsed tree for structured outcomes.
    pub fn tree(&self) -> Option<&Tree> {
        match self {
            ParseOutcome::Strict(tree) | ParseOutcome::Repaired { tree, .. } => Some(tree),
            _ => None,
        }
    }
}

/// A recovered failure inside the cascade. Logged, never surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDiagnostic {
    #[error("no JSON object boundary in model output")]
    NoBoundary,

    #[error("strict parse failed: {0}")]
    StrictParse(StrictParseError),

    #[error("parse after repair failed: {0}")]
    RepairedParse(StrictParseError),

    #[error("manual extraction used placeholders for {fields:?}")]
    ManualExtractionIncomplete { fields: Vec<&'static str> },
}

/// Run the cascade and return the outcome together with every recovered
/// failure along the way.
pub fn parse_with_diagnostics(raw: &str) -> (ParseOutcome, Vec<ParseDiagnostic>) {
    let mut diagnostics = Vec::new();

    if raw.trim().is_empty() {
        return (ParseOutcome::Unrecoverable, diagnostics);
    }

    match extract_candidate(raw) {
        Boundary::NoBoundary => diagnostics.push(ParseDiagnostic::NoBoundary),
        Boundary::Candidate(candidate) => match parse_strict(&candidate) {
            Ok(tree) => return (ParseOutcome::Strict(tree), diagnostics),
            Err(err) => {
                diagnostics.push(ParseDiagnostic::StrictParse(err));
                let report = repair(candidate.as_str());
                if report.changed() {
                    match reparse(&report.text) {
                        Ok(tree) => {
                            let outcome = ParseOutcome::Repaired {
                                tree,
                                applied_rules: report.applied,
                            };
                            return (outcome, diagnostics);
                        }
                        Err(err) => diagnostics.push(ParseDiagnostic::RepairedParse(err)),
                    }
                }
            }
        },
    }

    let fields = extract_fields(raw);
    if !fields.placeholders.is_empty() {
        diagnostics.push(ParseDiagnostic::ManualExtractionIncomplete {
            fields: fields.placeholders.clone(),
        });
    }
    (ParseOutcome::Manual(fields), diagnostics)
}

/// Boundary extraction and strict parse over repaired text.
fn reparse(text: &str) -> Result<Tree, StrictParseError> {
    match extract_candidate(text) {
        Boundary::Candidate(candidate) => parse_strict(&candidate),
        Boundary::NoBoundary => Err(StrictParseError {
            line: 0,
            column: 0,
            message: "repair removed the object boundary".to_string(),
        }),
    }
}

/// Run the cascade, logging each recovered failure.
pub fn parse_model_output(raw: &str) -> ParseOutcome {
    let (outcome, diagnostics) = parse_with_diagnostics(raw);

    for diagnostic in &diagnostics {
        match diagnostic {
            ParseDiagnostic::StrictParse(err) | ParseDiagnostic::RepairedParse(err) => {
                tracing::warn!(line = err.line, column = err.column, "{diagnostic}");
            }
            ParseDiagnostic::NoBoundary => tracing::warn!("{diagnostic}"),
            ParseDiagnostic::ManualExtractionIncomplete { .. } => tracing::info!("{diagnostic}"),
        }
    }

    tracing::debug!(
        strategy = %outcome.strategy(),
        repairs = ?outcome.applied_rules(),
        "model output parsed"
    );
    outcome
}
