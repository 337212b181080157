//! Analysis pipeline: paced upstream call → parse cascade → normalizer
//!
//! Formatting problems in model output never become errors here. The only
//! failure `analyze` returns is the upstream call's own.

use crate::client::{AnalysisRequest, ModelClient, UpstreamError};
use crate::normalize::{normalize, placeholder_fields};
use crate::parse::parse_model_output;
use crate::record::{AnalysisEnvelope, AnalysisMode, EnvelopeMetadata};
use crate::timing::{paced, TimingConfig};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Raw text returned by the model for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelOutput {
    pub text: String,
    pub depth: AnalysisMode,
    pub received_at: DateTime<Utc>,
}

impl RawModelOutput {
    pub fn new(text: impl Into<String>, depth: AnalysisMode) -> Self {
        Self {
            text: text.into(),
            depth,
            received_at: Utc::now(),
        }
    }
}

/// Turn raw model output into a complete envelope. Never fails.
pub fn process_model_output(raw: &RawModelOutput) -> AnalysisEnvelope {
    let outcome = parse_model_output(&raw.text);
    let analysis = normalize(&outcome, raw.depth);
    let placeholders = placeholder_fields(&outcome);

    if !placeholders.is_empty() {
        tracing::info!(fields = ?placeholders, "record uses placeholder values");
    }

    let metadata = EnvelopeMetadata {
        request_id: Uuid::new_v4(),
        processed_at: Utc::now(),
        analysis_mode: raw.depth,
        parse_strategy: outcome.strategy(),
        repairs_applied: outcome.applied_rules().iter().map(|r| r.to_string()).collect(),
        placeholder_fields: placeholders.iter().map(|f| f.to_string()).collect(),
    };
    AnalysisEnvelope::new(analysis, metadata)
}

/// Runs a model client under the per-depth timing floor and normalizes
/// whatever it returns.
pub struct AnalysisPipeline {
    client: Arc<dyn ModelClient>,
    timing: TimingConfig,
}

impl AnalysisPipeline {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            timing: TimingConfig::default(),
        }
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Ask the model for an analysis and return the normalized envelope.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisEnvelope, UpstreamError> {
        let floor = self.timing.floor(request.depth);
        tracing::debug!(
            document = %request.document_name,
            depth = %request.depth,
            floor_secs = floor.as_secs(),
            "requesting analysis"
        );

        let text = paced(self.client.generate(request), floor)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "upstream call failed"))?;

        let raw = RawModelOutput::new(text, request.depth);
        let envelope = process_model_output(&raw);
        tracing::info!(
            request_id = %envelope.metadata.request_id,
            strategy = %envelope.metadata.parse_strategy,
            "analysis complete"
        );
        Ok(envelope)
    }
}
