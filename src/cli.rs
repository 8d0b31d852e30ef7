//! CLI argument parsing for benchfold

use crate::config::{AggregatorConfig, MissingContextPolicy};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// CSV-like rows, one per test (default)
    Csv,
    /// JSON document for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "benchfold")]
#[command(version)]
#[command(about = "Fold repeated benchmark runs from a harness log into one row per test", long_about = None)]
pub struct Cli {
    /// Harness log to read ("-" or omitted reads stdin)
    #[arg(value_name = "LOG")]
    pub log: Option<PathBuf>,

    /// Output format (csv or json)
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Skip data lines that appear before any "Testing:" line instead of failing
    #[arg(long = "lenient")]
    pub lenient: bool,

    /// Stop after reading this many lines
    #[arg(long = "max-lines", value_name = "N")]
    pub max_lines: Option<usize>,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Log path to open, None means stdin
    pub fn log_path(&self) -> Option<&PathBuf> {
        self.log.as_ref().filter(|path| path.as_os_str() != "-")
    }

    /// Aggregator settings selected by the flags
    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            missing_context: if self.lenient {
                MissingContextPolicy::Skip
            } else {
                MissingContextPolicy::Fail
            },
            max_lines: self.max_lines,
        }
    }
}
