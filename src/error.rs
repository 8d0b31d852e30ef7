//! Error taxonomy for log aggregation
//!
//! Every error is fatal: the harness log is treated as corrupt and the run
//! stops at the first offending line. Positional variants carry the 1-based
//! line number so the operator can fix the input and re-run.

use thiserror::Error;

/// Errors that can occur while folding a harness log
#[derive(Error, Debug)]
pub enum SummaryError {
    /// A value that must be constant across repeated runs changed
    #[error("Inconsistent {field} for test '{test}' at line {line}: {old} != {new}")]
    InconsistentRun {
        line: usize,
        test: String,
        field: String,
        old: String,
        new: String,
    },

    /// The benchmark process reported a non-zero exit code
    #[error("Benchmark exited with code {code} at line {line}")]
    ExitCode { line: usize, code: String },

    /// A token expected to be numeric did not parse
    #[error("Malformed number '{token}' (token {index}) at line {line}")]
    MalformedNumber {
        line: usize,
        token: String,
        index: usize,
    },

    /// A recognised line is too short to carry the token its rule reads
    #[error("Missing token {index} on '{kind}' line {line}")]
    MissingToken {
        line: usize,
        index: usize,
        kind: &'static str,
    },

    /// A data line arrived before any `Testing:` line
    #[error("'{kind}' line {line} appears before any 'Testing:' line")]
    MissingContext { line: usize, kind: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for aggregation operations
pub type Result<T> = std::result::Result<T, SummaryError>;
