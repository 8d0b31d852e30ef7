//! JSON output format for summaries
//!
//! Carries the same fields as the CSV format plus each test's run count.
//! Unset values serialize as `null`.

use crate::record::{MemoryStat, Summary, TestRecord};
use serde::{Deserialize, Serialize};

/// Count and size of one allocation event family
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonMemoryStat {
    pub count: Option<u64>,
    pub size: Option<u64>,
}

impl From<&MemoryStat> for JsonMemoryStat {
    fn from(stat: &MemoryStat) -> Self {
        Self {
            count: stat.count,
            size: stat.total_size,
        }
    }
}

/// One aggregated test
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonTest {
    pub name: String,
    /// Number of runs folded into this entry
    pub runs: u64,
    pub population: Option<f64>,
    pub population_hit: Option<f64>,
    pub hit: Option<f64>,
    pub miss: Option<f64>,
    pub working_set: Option<i64>,
    pub alloc: JsonMemoryStat,
    pub free: JsonMemoryStat,
    pub grow: JsonMemoryStat,
    pub shrink: JsonMemoryStat,
}

impl From<&TestRecord> for JsonTest {
    fn from(record: &TestRecord) -> Self {
        Self {
            name: record.name.clone(),
            runs: record.run_count,
            population: record.population,
            population_hit: record.population_hit,
            hit: record.hit_rate,
            miss: record.miss_rate,
            working_set: record.working_set,
            alloc: (&record.alloc).into(),
            free: (&record.free).into(),
            grow: (&record.grow).into(),
            shrink: (&record.shrink).into(),
        }
    }
}

/// Complete JSON document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonSummary {
    pub version: String,
    pub format: String,
    pub run_count: Option<u64>,
    pub data_size: Option<u64>,
    pub tests: Vec<JsonTest>,
}

impl JsonSummary {
    pub fn new(summary: &Summary) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "benchfold-json-v1".to_string(),
            run_count: summary.run_count,
            data_size: summary.data_size,
            tests: summary.records.iter().map(JsonTest::from).collect(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Render a summary as pretty JSON
pub fn render(summary: &Summary) -> serde_json::Result<String> {
    JsonSummary::new(summary).to_json()
}
