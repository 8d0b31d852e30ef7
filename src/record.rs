//! Per-test summary records
//!
//! One [`TestRecord`] exists per distinct test name (pool-mode runs carry a
//! `" pool"` suffix and are separate records). Records accumulate every run of
//! their test and are emitted in first-seen order inside a [`Summary`].

use crate::line::MemoryEvent;
use crate::merge::{self, Disagreement};

/// Count and total size of one allocation event family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStat {
    /// Number of events
    pub count: Option<u64>,
    /// Total size in bytes
    pub total_size: Option<u64>,
}

impl MemoryStat {
    /// Fold one run's observation, both fields must agree with prior runs
    ///
    /// On mismatch returns the name of the offending field with both values.
    pub fn merge(
        &mut self,
        count: u64,
        size: u64,
    ) -> Result<(), (&'static str, Disagreement)> {
        self.count = merge::agree(self.count, count).map_err(|d| ("count", d))?;
        self.total_size = merge::agree(self.total_size, size).map_err(|d| ("size", d))?;
        Ok(())
    }

    /// `count,size` with empty strings for unset fields
    pub fn render_csv(&self) -> String {
        format!(
            "{},{}",
            render_int(self.count),
            render_int(self.total_size)
        )
    }
}

/// Accumulated results for one named test
#[derive(Debug, Clone, PartialEq)]
pub struct TestRecord {
    pub name: String,
    /// Number of `Testing:` lines naming this test
    pub run_count: u64,
    pub alloc: MemoryStat,
    pub free: MemoryStat,
    pub grow: MemoryStat,
    pub shrink: MemoryStat,
    pub population: Option<f64>,
    pub population_hit: Option<f64>,
    pub hit_rate: Option<f64>,
    pub miss_rate: Option<f64>,
    pub working_set: Option<i64>,
}

impl TestRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            run_count: 0,
            alloc: MemoryStat::default(),
            free: MemoryStat::default(),
            grow: MemoryStat::default(),
            shrink: MemoryStat::default(),
            population: None,
            population_hit: None,
            hit_rate: None,
            miss_rate: None,
            working_set: None,
        }
    }

    /// The stat block an event feeds; pool allocations land in `alloc`
    pub fn stat_mut(&mut self, event: MemoryEvent) -> &mut MemoryStat {
        match event {
            MemoryEvent::New | MemoryEvent::Alloc => &mut self.alloc,
            MemoryEvent::Free => &mut self.free,
            MemoryEvent::Grow => &mut self.grow,
            MemoryEvent::Shrink => &mut self.shrink,
        }
    }

    /// One summary row:
    /// `name,population,populationHit,hit,miss,workingSet,,alloc..,free..,grow..,shrink..`
    pub fn render_csv(&self) -> String {
        let fields = [
            self.name.clone(),
            render_decimal(self.population),
            render_decimal(self.population_hit),
            render_decimal(self.hit_rate),
            render_decimal(self.miss_rate),
            render_int(self.working_set),
            String::new(),
            self.alloc.render_csv(),
            self.free.render_csv(),
            self.grow.render_csv(),
            self.shrink.render_csv(),
        ];
        fields.join(",")
    }
}

/// Result of folding a whole log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Replication count shared by every `Testing:` line
    pub run_count: Option<u64>,
    pub data_size: Option<u64>,
    /// Records in first-seen order
    pub records: Vec<TestRecord>,
}

impl Summary {
    /// `runCount,dataSize` header with empty strings for unset values
    pub fn header_csv(&self) -> String {
        format!(
            "{},{}",
            render_int(self.run_count),
            render_int(self.data_size)
        )
    }

    pub fn get(&self, name: &str) -> Option<&TestRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}

pub(crate) fn render_int<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Decimals always keep a fractional part (`2.0`, not `2`)
///
/// Values are written positionally, never in exponent form: `0.00001` stays
/// `0.00001` and `1e20` renders as `100000000000000000000.0`. The harness
/// writes fixed two-decimal timings, which render unchanged.
pub(crate) fn render_decimal(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 => format!("{v:.1}"),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}
