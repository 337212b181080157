//! lexnorm CLI: normalize captured model output into analysis records.
//!
//! Usage:
//!   lexnorm normalize [FILE] [--depth deep] [--compact]
//!   lexnorm replay FILE [--depth deep]
//!   lexnorm repair [FILE]
//!   lexnorm schema
//!   lexnorm config

use clap::{Parser, Subcommand};
use lexnorm::parse::{extract_candidate, repair, Boundary};
use lexnorm::{
    process_model_output, AnalysisEnvelope, AnalysisMode, AnalysisPipeline, AnalysisRequest,
    PipelineConfig, RawModelOutput, ReplayClient,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lexnorm",
    version,
    about = "Normalize model-produced legal document analyses"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize raw model output into an analysis envelope
    Normalize {
        /// File with raw model output (stdin when omitted)
        file: Option<PathBuf>,
        /// Requested analysis depth (quick, deep, comprehensive)
        #[arg(long, default_value = "deep")]
        depth: AnalysisMode,
        /// Print compact JSON instead of pretty JSON
        #[arg(long)]
        compact: bool,
    },
    /// Run the full paced pipeline against a captured response
    Replay {
        /// File with a captured model response
        file: PathBuf,
        /// Requested analysis depth (quick, deep, comprehensive)
        #[arg(long, default_value = "deep")]
        depth: AnalysisMode,
    },
    /// Show the repaired candidate and which rules changed it
    Repair {
        /// File with raw model output (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Print the JSON Schema of the analysis envelope
    Schema,
    /// Print the effective configuration as YAML
    Config,
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(file: Option<&Path>) -> Result<String, String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e)),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("cannot read stdin: {}", e))?;
            Ok(text)
        }
    }
}

fn print_envelope(envelope: &AnalysisEnvelope, compact: bool) -> i32 {
    let json = if compact {
        serde_json::to_string(envelope)
    } else {
        serde_json::to_string_pretty(envelope)
    };
    match json {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_normalize(file: Option<&Path>, depth: AnalysisMode, compact: bool) -> i32 {
    let text = match read_input(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let envelope = process_model_output(&RawModelOutput::new(text, depth));
    print_envelope(&envelope, compact)
}

fn cmd_replay(config: &PipelineConfig, file: &Path, depth: AnalysisMode) -> i32 {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: cannot start runtime: {}", e);
            return 1;
        }
    };

    let pipeline = AnalysisPipeline::new(Arc::new(ReplayClient::new(file)))
        .with_timing(config.timing.clone());
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let request = AnalysisRequest::new(name, String::new()).with_depth(depth);
    tracing::debug!(
        file = %file.display(),
        floor_secs = pipeline.timing().floor(depth).as_secs(),
        "replaying model output"
    );

    match runtime.block_on(pipeline.analyze(&request)) {
        Ok(envelope) => print_envelope(&envelope, false),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_repair(file: Option<&Path>) -> i32 {
    let text = match read_input(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let candidate = match extract_candidate(&text) {
        Boundary::Candidate(candidate) => candidate,
        Boundary::NoBoundary => {
            eprintln!("Error: no JSON object boundary found");
            return 1;
        }
    };

    let report = repair(candidate.as_str());
    if report.changed() {
        eprintln!("Applied: {}", report.applied.join(", "));
    } else {
        eprintln!("No repairs needed.");
    }
    println!("{}", report.text);
    0
}

fn cmd_schema() -> i32 {
    match serde_json::to_string_pretty(&AnalysisEnvelope::json_schema()) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_config(config: &PipelineConfig) -> i32 {
    match config.to_yaml() {
        Ok(yaml) => {
            print!("{}", yaml);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match PipelineConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_filter);

    let code = match cli.command {
        Commands::Normalize {
            file,
            depth,
            compact,
        } => cmd_normalize(file.as_deref(), depth, compact),
        Commands::Replay { file, depth } => cmd_replay(&config, &file, depth),
        Commands::Repair { file } => cmd_repair(file.as_deref()),
        Commands::Schema => cmd_schema(),
        Commands::Config => cmd_config(&config),
    };
    std::process::exit(code);
}
