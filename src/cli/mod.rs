//! CLI interface for bizval
//!
//! Provides subcommands for:
//! - `value`: Value a single business
//! - `batch`: Value every request in a JSON-lines file
//! - `industries`: Show the industry reference table
//! - `config`: Show the effective configuration

mod batch;
mod value;

pub use batch::BatchArgs;
pub use value::ValueArgs;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bizval")]
#[command(about = "Estimate the value of a business from its financials")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Value a single business
    Value(ValueArgs),
    /// Value every request in a JSON-lines file
    Batch(BatchArgs),
    /// Show the industry reference table
    Industries {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Show the effective configuration
    Config,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
}
