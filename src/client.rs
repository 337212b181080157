//! Model client: the upstream call that produces raw analysis text
//!
//! Defines the client trait and request type for asking a model to analyze
//! a document. Two implementations:
//! - `MockClient`: returns a preconfigured response or failure (testing)
//! - `ReplayClient`: returns a previously captured response from disk
//!
//! Transport clients for a hosted model implement the same trait.

use crate::record::AnalysisMode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// What the model is asked to analyze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub document_name: String,
    pub document_text: String,
    #[serde(default)]
    pub depth: AnalysisMode,
}

impl AnalysisRequest {
    pub fn new(document_name: impl Into<String>, document_text: impl Into<String>) -> Self {
        Self {
            document_name: document_name.into(),
            document_text: document_text.into(),
            depth: AnalysisMode::default(),
        }
    }

    pub fn with_depth(mut self, depth: AnalysisMode) -> Self {
        self.depth = depth;
        self
    }
}

/// Failure of the upstream call itself. The only error the pipeline
/// returns to its caller.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("model not available: {0}")]
    Unavailable(String),
    #[error("invocation failed: {0}")]
    InvocationFailed(String),
    #[error("cannot read captured response {path}: {source}")]
    Replay {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Client trait for asking a model to analyze a document.
///
/// Abstracts over transport so the pipeline doesn't depend on how the
/// model is reached.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Return the model's raw response text.
    async fn generate(&self, request: &AnalysisRequest) -> Result<String, UpstreamError>;
}

/// Mock client for testing. Returns a preconfigured response.
pub struct MockClient {
    available: bool,
    response: Result<String, String>,
    latency: Duration,
}

impl MockClient {
    /// A mock that answers with an empty response until configured.
    pub fn available() -> Self {
        Self {
            available: true,
            response: Ok(String::new()),
            latency: Duration::ZERO,
        }
    }

    /// A mock that reports the model as unreachable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::available()
        }
    }

    pub fn with_response(mut self, text: impl Into<String>) -> Self {
        self.response = Ok(text.into());
        self
    }

    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.response = Err(message.into());
        self
    }

    /// Simulated time the call takes before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl ModelClient for MockClient {
    async fn generate(&self, _request: &AnalysisRequest) -> Result<String, UpstreamError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if !self.available {
            return Err(UpstreamError::Unavailable(
                "mock client configured as unavailable".to_string(),
            ));
        }

        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(UpstreamError::InvocationFailed(message.clone())),
        }
    }
}

/// Returns a captured model response from a file, ignoring the request.
#[derive(Debug, Clone)]
pub struct ReplayClient {
    path: PathBuf,
}

impl ReplayClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ModelClient for ReplayClient {
    async fn generate(&self, request: &AnalysisRequest) -> Result<String, UpstreamError> {
        tracing::debug!(
            path = %self.path.display(),
            document = %request.document_name,
            "replaying captured response"
        );
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| UpstreamError::Replay {
                path: self.path.display().to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn request() -> AnalysisRequest {
        AnalysisRequest::new("lease.pdf", "The tenant shall pay rent monthly.")
    }

    #[tokio::test]
    async fn mock_available_client_returns_response() {
        let client = MockClient::available().with_response(r#"{"documentType": "Lease"}"#);
        let text = client.generate(&request()).await.unwrap();
        assert_eq!(text, r#"{"documentType": "Lease"}"#);
    }

    #[tokio::test]
    async fn mock_unavailable_client_returns_error() {
        let err = MockClient::unavailable().generate(&request()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Unavailable(_)));
    }

    #[tokio::test]
    async fn mock_failure_is_invocation_failed() {
        let client = MockClient::available().with_failure("rate limited");
        let err = client.generate(&request()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::InvocationFailed(ref m) if m == "rate limited"));
    }

    #[tokio::test]
    async fn replay_reads_captured_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "```json\n{{\"summary\": \"ok\"}}\n```").unwrap();

        let client = ReplayClient::new(file.path());
        let text = client.generate(&request()).await.unwrap();
        assert!(text.contains("\"summary\""));
    }

    #[tokio::test]
    async fn replay_of_missing_file_is_an_upstream_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = ReplayClient::new(dir.path().join("missing.txt"));
        let err = client.generate(&request()).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Replay { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn request_depth_defaults_to_deep() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"documentName": "a", "documentText": "b"}"#).unwrap();
        assert_eq!(request.depth, AnalysisMode::Deep);
    }
}
