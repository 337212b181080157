//! Response envelope handed to report and UI consumers

use super::types::{AnalysisMode, AnalysisRecord};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which stage of the parse cascade produced the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParseStrategy {
    Strict,
    Repaired,
    Manual,
    Unrecoverable,
}

impl ParseStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStrategy::Strict => "strict",
            ParseStrategy::Repaired => "repaired",
            ParseStrategy::Manual => "manual",
            ParseStrategy::Unrecoverable => "unrecoverable",
        }
    }
}

impl std::fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostics about how a record was produced. Never carries parser
/// offsets; those are logged only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeMetadata {
    pub request_id: Uuid,
    pub processed_at: DateTime<Utc>,
    pub analysis_mode: AnalysisMode,
    pub parse_strategy: ParseStrategy,
    /// Names of repair rules that changed the text, in application order.
    pub repairs_applied: Vec<String>,
    /// Scalar fields filled with canned placeholders.
    pub placeholder_fields: Vec<String>,
}

/// A complete record plus a success flag. There is no partial variant:
/// upstream failures are returned as errors instead of envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEnvelope {
    pub success: bool,
    pub analysis: AnalysisRecord,
    pub metadata: EnvelopeMetadata,
}

impl AnalysisEnvelope {
    pub fn new(analysis: AnalysisRecord, metadata: EnvelopeMetadata) -> Self {
        Self {
            success: true,
            analysis,
            metadata,
        }
    }

    /// JSON Schema of the envelope, for consumers that validate input.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(AnalysisEnvelope)
    }
}
