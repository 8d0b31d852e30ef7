//! Stateful line-by-line aggregation of harness logs
//!
//! The only control state is which test is current, set exclusively by
//! `Testing:` lines. Every other line updates either the global run constants
//! or the current record.

use crate::config::{AggregatorConfig, MissingContextPolicy};
use crate::error::{Result, SummaryError};
use crate::line::{self, LineKind, TestingLine};
use crate::merge::{self, Disagreement};
use crate::record::{Summary, TestRecord};
use std::collections::HashMap;
use std::io::BufRead;
use tracing::{debug, info, trace, warn};

/// The test that data lines currently apply to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestContext {
    /// Index into the record list
    pub index: usize,
    pub pool: bool,
    pub wrap_alloc: bool,
}

/// Explicit parser state threaded through every line
#[derive(Debug, Default)]
pub struct ParserState {
    /// Replication count declared by `Testing:` lines
    pub run_count: Option<u64>,
    pub data_size: Option<u64>,
    pub current: Option<TestContext>,
    records: Vec<TestRecord>,
    by_name: HashMap<String, usize>,
}

impl ParserState {
    fn record_index(&mut self, name: &str) -> usize {
        if let Some(&index) = self.by_name.get(name) {
            return index;
        }
        let index = self.records.len();
        debug!(test = name, "new test record");
        self.records.push(TestRecord::new(name));
        self.by_name.insert(name.to_string(), index);
        index
    }

    /// Name of the current test, empty before the first `Testing:` line
    pub fn current_name(&self) -> &str {
        self.current
            .as_ref()
            .map_or("", |current| self.records[current.index].name.as_str())
    }

    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }
}

/// Folds repeated runs of each named test into one record
#[derive(Debug, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
    state: ParserState,
    lines_seen: usize,
}

impl Aggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self {
            config,
            state: ParserState::default(),
            lines_seen: 0,
        }
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// Classify and apply one line (`line_no` is 1-based)
    pub fn feed(&mut self, line_no: usize, text: &str) -> Result<()> {
        self.lines_seen += 1;
        let kind = line::classify(line_no, text)?;
        self.apply(line_no, kind)
    }

    /// Consume every line of `reader`, honoring `max_lines`
    pub fn consume<R: BufRead>(&mut self, reader: R) -> Result<()> {
        self.config.validate()?;
        for (index, text) in reader.lines().enumerate() {
            if self.config.max_lines.is_some_and(|max| index >= max) {
                debug!(max_lines = index, "line limit reached");
                break;
            }
            self.feed(index + 1, &text?)?;
        }
        Ok(())
    }

    /// Finish the pass and hand over the collected records
    pub fn finish(self) -> Summary {
        info!(
            lines = self.lines_seen,
            tests = self.state.records.len(),
            "aggregation complete"
        );
        Summary {
            run_count: self.state.run_count,
            data_size: self.state.data_size,
            records: self.state.records,
        }
    }

    fn apply(&mut self, line_no: usize, kind: LineKind) -> Result<()> {
        match kind {
            LineKind::Blank | LineKind::Other => Ok(()),
            LineKind::Testing(testing) => self.begin_test(line_no, testing),
            LineKind::DataSize(size) => {
                self.state.data_size =
                    merge::agree(self.state.data_size, size).map_err(|d| {
                        inconsistent(line_no, self.state.current_name(), "data size", d)
                    })?;
                Ok(())
            }
            LineKind::Exit(code) => {
                if code != "0" {
                    return Err(SummaryError::ExitCode {
                        line: line_no,
                        code,
                    });
                }
                Ok(())
            }
            kind => self.update_current(line_no, kind),
        }
    }

    fn begin_test(&mut self, line_no: usize, testing: TestingLine) -> Result<()> {
        self.state.run_count = merge::agree(self.state.run_count, testing.run_count)
            .map_err(|d| inconsistent(line_no, &testing.name, "run count", d))?;

        let index = self.state.record_index(&testing.name);
        self.state.records[index].run_count += 1;
        debug!(
            test = %testing.name,
            pool = testing.pool,
            wrap_alloc = testing.wrap_alloc,
            line = line_no,
            "begin run"
        );
        self.state.current = Some(TestContext {
            index,
            pool: testing.pool,
            wrap_alloc: testing.wrap_alloc,
        });
        Ok(())
    }

    fn update_current(&mut self, line_no: usize, kind: LineKind) -> Result<()> {
        let pool = self.state.current.as_ref().is_some_and(|c| c.pool);
        if let LineKind::Memory { event, .. } = &kind {
            if !event.honored_in(pool) {
                trace!(
                    line = line_no,
                    event = event.label(),
                    pool,
                    "ignored memory line"
                );
                return Ok(());
            }
        }
        let index = match &self.state.current {
            Some(current) => current.index,
            None => return self.orphan_line(line_no, &kind),
        };
        let record = &mut self.state.records[index];

        match kind {
            LineKind::Population(v) => {
                record.population = merge::min_positive(record.population, v);
            }
            LineKind::PopulationHit(v) => {
                record.population_hit = merge::min_positive(record.population_hit, v);
            }
            LineKind::Hit(v) => record.hit_rate = merge::min_positive(record.hit_rate, v),
            LineKind::Miss(v) => record.miss_rate = merge::min_positive(record.miss_rate, v),
            LineKind::WorkingSet(v) => {
                record.working_set = merge::min_positive(record.working_set, v);
            }
            LineKind::Memory { event, count, size } => {
                let merged = record.stat_mut(event).merge(count, size);
                merged.map_err(|(field, d)| {
                    let field = format!("{} {}", event.stat_name(), field);
                    inconsistent(line_no, &record.name, field, d)
                })?;
            }
            LineKind::Blank
            | LineKind::Other
            | LineKind::Testing(_)
            | LineKind::DataSize(_)
            | LineKind::Exit(_) => {}
        }
        Ok(())
    }

    fn orphan_line(&self, line_no: usize, kind: &LineKind) -> Result<()> {
        match self.config.missing_context {
            MissingContextPolicy::Fail => Err(SummaryError::MissingContext {
                line: line_no,
                kind: kind.label(),
            }),
            MissingContextPolicy::Skip => {
                warn!(
                    line = line_no,
                    kind = kind.label(),
                    "no current test, skipping"
                );
                Ok(())
            }
        }
    }
}

fn inconsistent(
    line: usize,
    test: &str,
    field: impl Into<String>,
    d: Disagreement,
) -> SummaryError {
    SummaryError::InconsistentRun {
        line,
        test: test.to_string(),
        field: field.into(),
        old: d.old,
        new: d.new,
    }
}

/// Fold every line of `reader` into a summary
pub fn aggregate_reader<R: BufRead>(reader: R, config: AggregatorConfig) -> Result<Summary> {
    let mut aggregator = Aggregator::new(config);
    aggregator.consume(reader)?;
    Ok(aggregator.finish())
}

/// Fold an in-memory log into a summary
pub fn aggregate_str(log: &str, config: AggregatorConfig) -> Result<Summary> {
    aggregate_reader(log.as_bytes(), config)
}
