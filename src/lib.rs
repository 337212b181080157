//! lexnorm: Normalization of Model-Produced Document Analyses
//!
//! Takes the free-form text a language model returns for a legal document
//! analysis and turns it, without ever failing on formatting, into a fully
//! populated, schema-conformant record.
//!
//! # Core Concepts
//!
//! - **Parse cascade**: boundary extraction, strict parse, rule-based repair
//!   and manual field extraction, tried in that order
//! - **Normalizer**: maps whatever was recovered onto the canonical record
//!   with typed defaults and alias resolution
//! - **Timing floor**: a minimum duration per analysis depth around the
//!   upstream call
//!
//! # Example
//!
//! ```
//! use lexnorm::{process_model_output, AnalysisMode, RawModelOutput};
//!
//! let raw = RawModelOutput::new("{\"documentType\": \"NDA\"}", AnalysisMode::Quick);
//! let envelope = process_model_output(&raw);
//! assert_eq!(envelope.analysis.document_type, "NDA");
//! assert!(envelope.analysis.key_parties.is_empty());
//! ```

pub mod client;
pub mod config;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod record;
pub mod timing;

pub use client::{AnalysisRequest, MockClient, ModelClient, ReplayClient, UpstreamError};
pub use config::{ConfigError, PipelineConfig};
pub use normalize::{normalize, placeholder_fields};
pub use parse::{parse_model_output, ParseDiagnostic, ParseOutcome, PartialFields};
pub use pipeline::{process_model_output, AnalysisPipeline, RawModelOutput};
pub use record::{AnalysisEnvelope, AnalysisMode, AnalysisRecord, EnvelopeMetadata, ParseStrategy};
pub use timing::{paced, TimingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
