//! CLI argument types: `Cli`, `Command`, and per-command arg structs.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Evaluar: declarative model evaluation configuration
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "evaluar")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Validate, inspect, and scaffold model evaluation configs")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate a configuration file, reporting every issue found
    Validate(ValidateArgs),

    /// Display information about a configuration
    Info(InfoArgs),

    /// Generate a starter configuration
    Init(InitArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to the configuration file (.yaml, .yml, or .json)
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show a detailed configuration summary after validation
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to the configuration file (.yaml, .yml, or .json)
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the init command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InitArgs {
    /// Template to generate (minimal, thresholds)
    #[arg(short, long, default_value = "minimal")]
    pub template: InitTemplate,

    /// Write to this path instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Model name used in the generated config
    #[arg(short, long, default_value = "candidate")]
    pub name: String,
}

/// Output format for the info command
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(format!("Unknown output format: {s}. Valid formats: text, json, yaml")),
        }
    }
}

/// Starter config templates for the init command
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InitTemplate {
    /// One model, the overall slice, a couple of metrics
    #[default]
    Minimal,
    /// Candidate vs baseline with value and change thresholds
    Thresholds,
}

impl std::str::FromStr for InitTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(InitTemplate::Minimal),
            "thresholds" => Ok(InitTemplate::Thresholds),
            _ => Err(format!("Unknown template: {s}. Valid templates: minimal, thresholds")),
        }
    }
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
