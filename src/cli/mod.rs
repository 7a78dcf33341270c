//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// Cadre - segmented multi-dataset export
#[derive(Parser, Debug)]
#[command(name = "cadre")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cadre.toml", env = "CADRE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CADRE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export one or more datasets of a brand as CSV or ZIP
    Export(commands::export::ExportArgs),

    /// List the exportable dataset kinds
    Kinds(commands::kinds::KindsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
