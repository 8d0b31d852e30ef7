//! Aggregation settings
//!
//! There is no configuration file; the CLI maps its flags into an
//! [`AggregatorConfig`].

use crate::error::{Result, SummaryError};
use serde::{Deserialize, Serialize};

/// What to do with a data line that arrives before any `Testing:` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingContextPolicy {
    /// Abort with `SummaryError::MissingContext`
    #[default]
    Fail,
    /// Skip the line and log a warning
    Skip,
}

/// Configuration for a single aggregation pass
///
/// # Example
/// ```
/// use benchfold::config::{AggregatorConfig, MissingContextPolicy};
///
/// let config = AggregatorConfig::default();
/// assert_eq!(config.missing_context, MissingContextPolicy::Fail);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Handling of data lines with no current test
    ///
    /// Default: `Fail`, so that no measurement is silently dropped.
    pub missing_context: MissingContextPolicy,

    /// Stop after this many lines (None = read to end of input)
    pub max_lines: Option<usize>,
}

impl AggregatorConfig {
    /// Fail fast on every input defect
    pub fn strict() -> Self {
        Self::default()
    }

    /// Skip orphan data lines instead of failing
    pub fn lenient() -> Self {
        Self {
            missing_context: MissingContextPolicy::Skip,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_lines == Some(0) {
            return Err(SummaryError::InvalidConfig(
                "max_lines must be >= 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}
