//! Benchfold - fold repeated allocator/cache benchmark runs into summaries
//!
//! This library classifies the text log written by the set benchmark harness,
//! checks that run constants agree across repeated runs of the same test, keeps
//! the smallest positive timing per test, and renders one row per test.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod json_output;
pub mod line;
pub mod merge;
pub mod record;

pub use aggregator::{aggregate_reader, aggregate_str, Aggregator};
pub use config::AggregatorConfig;
pub use error::{Result, SummaryError};
pub use record::{MemoryStat, Summary, TestRecord};
