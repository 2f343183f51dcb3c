//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Pretty,
    /// JSON document
    Json,
}

impl From<OutputFormat> for mindat_query_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Pretty => mindat_query_domain::OutputFormat::Pretty,
            OutputFormat::Json => mindat_query_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for mindat-query
#[derive(Parser, Debug)]
#[command(name = "mindat-query")]
#[command(author, version, about = "Turn a mineral search request into validated mindat API parameters")]
#[command(long_about = r#"
mindat-query turns a free-text request about minerals into structured search
parameters for the mindat API.

The process:
1. Generation: three independent generations run in parallel (or one with --repeats 1)
2. Consensus: a value shared by at least two generations wins (up to 3 rounds)
3. Rule validation: hardness, crystal systems, element symbols, conflicts
4. Semantic validation (--validate): an LLM checks the parameters against the
   request and the API documentation

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./mindat-query.toml      Project-level config
3. ~/.config/mindat-query/config.toml   Global config

Example:
  mindat-query "IMA minerals with hardness 3-5, hexagonal, with neodymium but no sulfur"
  mindat-query --repeats 1 --output json "copper minerals"
  mindat-query --validate "minerals like quartz"
"#)]
pub struct Cli {
    /// The search request
    pub query: Option<String>,

    /// Independent generations per round (1 or 3)
    #[arg(short, long, value_name = "N")]
    pub repeats: Option<usize>,

    /// Run rule and semantic validation on each generated result
    #[arg(long)]
    pub validate: bool,

    /// API endpoint whose documentation backs semantic validation
    #[arg(long, value_name = "PATH")]
    pub endpoint: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
