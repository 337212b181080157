//! Paced pipeline behavior on tokio's paused clock

mod common;

use lexnorm::{
    AnalysisMode, AnalysisPipeline, AnalysisRequest, MockClient, ParseStrategy, TimingConfig,
    UpstreamError,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn request(depth: AnalysisMode) -> AnalysisRequest {
    AnalysisRequest::new("contract.pdf", "The parties agree as follows.").with_depth(depth)
}

fn assert_elapsed(start: Instant, secs: u64) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= Duration::from_secs(secs) && elapsed < Duration::from_secs(secs + 1),
        "expected ~{}s, got {:?}",
        secs,
        elapsed
    );
}

#[tokio::test(start_paused = true)]
async fn quick_analysis_waits_for_its_floor() {
    let client = MockClient::available()
        .with_response(common::MINIMAL)
        .with_latency(Duration::from_secs(2));
    let pipeline = AnalysisPipeline::new(Arc::new(client));

    let start = Instant::now();
    let envelope = pipeline.analyze(&request(AnalysisMode::Quick)).await.unwrap();

    assert_elapsed(start, 30);
    assert_eq!(envelope.analysis.document_type, "NDA");
    assert_eq!(envelope.analysis.analysis_mode, AnalysisMode::Quick);
}

#[tokio::test(start_paused = true)]
async fn comprehensive_failure_returns_without_waiting() {
    let client = MockClient::available()
        .with_failure("upstream timeout")
        .with_latency(Duration::from_secs(5));
    let pipeline = AnalysisPipeline::new(Arc::new(client));

    let start = Instant::now();
    let err = pipeline
        .analyze(&request(AnalysisMode::Comprehensive))
        .await
        .unwrap_err();

    assert_elapsed(start, 5);
    assert!(matches!(err, UpstreamError::InvocationFailed(_)));
}

#[tokio::test(start_paused = true)]
async fn slow_call_is_not_delayed_past_completion() {
    let client = MockClient::available()
        .with_response(common::FENCED_TRAILING_COMMA)
        .with_latency(Duration::from_secs(120));
    let pipeline = AnalysisPipeline::new(Arc::new(client));

    let start = Instant::now();
    let envelope = pipeline.analyze(&request(AnalysisMode::Deep)).await.unwrap();

    assert_elapsed(start, 120);
    assert_eq!(envelope.metadata.parse_strategy, ParseStrategy::Repaired);
}

#[tokio::test(start_paused = true)]
async fn disabled_pacing_releases_on_completion() {
    let client = MockClient::available()
        .with_response(common::PROSE)
        .with_latency(Duration::from_secs(3));
    let pipeline = AnalysisPipeline::new(Arc::new(client)).with_timing(TimingConfig::disabled());

    let start = Instant::now();
    let envelope = pipeline
        .analyze(&request(AnalysisMode::Comprehensive))
        .await
        .unwrap();

    assert_elapsed(start, 3);
    assert_eq!(envelope.metadata.parse_strategy, ParseStrategy::Manual);
}

#[tokio::test(start_paused = true)]
async fn unavailable_model_is_an_error_not_an_envelope() {
    let pipeline = AnalysisPipeline::new(Arc::new(MockClient::unavailable()));

    let err = pipeline.analyze(&request(AnalysisMode::Quick)).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Unavailable(_)));
}

#[tokio::test(start_paused = true)]
async fn configured_floors_are_used() {
    let timing = TimingConfig {
        quick_secs: 7,
        ..TimingConfig::default()
    };
    let client = MockClient::available().with_response(common::MINIMAL);
    let pipeline = AnalysisPipeline::new(Arc::new(client)).with_timing(timing);

    let start = Instant::now();
    pipeline.analyze(&request(AnalysisMode::Quick)).await.unwrap();
    assert_elapsed(start, 7);
}
