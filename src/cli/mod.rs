//! CLI module for Vigil
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `run` - Evaluate a prompt set through the pipeline
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Run the built-in sample prompts with default config
//! vigil run
//!
//! # Evaluate a dataset, capped at 20 calls, writing JSON Lines
//! vigil run --prompts TruthfulQA.csv --budget 20 --output results.jsonl
//!
//! # Generate shell completions
//! vigil completions bash > ~/.bash_completion.d/vigil
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod run;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Vigil - entropy-gated LLM evaluation pipeline
#[derive(Parser, Debug)]
#[command(
    name = "vigil",
    version,
    about = "Entropy-gated generation routing and validation for LLM evaluation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run prompts through generation, routing and validation
    Run(RunArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "vigil.toml")]
    pub config: PathBuf,

    /// Prompt dataset (.csv, .json, .jsonl or one prompt per line); sample prompts if omitted
    #[arg(short, long)]
    pub prompts: Option<PathBuf>,

    /// Write records as JSON Lines to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the generation model
    #[arg(short, long)]
    pub model: Option<String>,

    /// Maximum number of prompts to process
    #[arg(long)]
    pub limit: Option<usize>,

    /// Maximum number of generation calls
    #[arg(long)]
    pub budget: Option<u32>,

    /// Minimum delay between generation calls, in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Sampling seed sent with every request
    #[arg(long)]
    pub seed: Option<u64>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VIGIL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Disable the NLI contradiction validator
    #[arg(long)]
    pub no_nli: bool,

    /// Print records and summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "vigil.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
