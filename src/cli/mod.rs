pub mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use llm_sizer::{PrecisionFormat, WorkloadMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "llm-sizer")]
#[command(about = "Estimate GPU memory, storage and GPU configurations for LLMs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate hardware requirements for a model
    Estimate(EstimateArgs),
    /// Fetch and normalize registry metadata for a model
    Fetch {
        /// Model identifier (org/name) or model page URL
        model: String,
        /// JSON config file supplying the registry endpoint and timeout
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the accelerator catalog grouped by memory tier
    Gpus,
    /// List model size presets
    Presets,
}

/// Inputs for a sizing run. Explicit flags override fetched metadata,
/// which overrides the config file.
#[derive(Args, Debug, Default)]
pub struct EstimateArgs {
    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Size preset (8B, 13B, 30B, 70B, 123B, 175B, 350B, 405B)
    #[arg(long, conflicts_with = "config")]
    pub preset: Option<String>,
    /// Model identifier or URL to pre-fill size and precision from the registry
    #[arg(long)]
    pub model: Option<String>,
    /// Parameter count in billions, e.g. 70 or 70B
    #[arg(long, value_parser = parse_params)]
    pub params: Option<f64>,
    /// Precision: fp32, fp16, fp8 or int4
    #[arg(long)]
    pub precision: Option<PrecisionFormat>,
    /// inference or training
    #[arg(long)]
    pub mode: Option<WorkloadMode>,
    /// Context length in tokens
    #[arg(long)]
    pub context_length: Option<u64>,
    /// Batch size
    #[arg(long)]
    pub batch_size: Option<u64>,
    /// Number of transformer layers
    #[arg(long)]
    pub num_layers: Option<u64>,
    /// Hidden dimension
    #[arg(long)]
    pub hidden_size: Option<u64>,
    /// Materialize the full attention score matrix (no efficient attention kernel)
    #[arg(long)]
    pub full_attention: bool,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

fn parse_params(input: &str) -> std::result::Result<f64, String> {
    llm_sizer::config::parse_param_count(input).map_err(|e| e.to_string())
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate(args) => commands::estimate(args).await,
        Commands::Fetch {
            model,
            config,
            json,
        } => commands::fetch(&model, config.as_deref(), json).await,
        Commands::Gpus => commands::gpus(),
        Commands::Presets => commands::presets(),
    }
}
