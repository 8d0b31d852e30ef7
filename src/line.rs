//! Line classification for benchmark harness logs
//!
//! Each line is split on whitespace once and mapped to a [`LineKind`] by its
//! leading token(s), with numeric payloads already parsed. Matching is purely
//! syntactic: a line from another tool that happens to start with `hit,` is
//! classified exactly like a harness timing line.
//!
//! Recognised shapes:
//! - `Testing: <name> max <M> bits <B> cnt <C> [wrap_alloc] [pool]`
//! - `Data size: <n> bytes ...`
//! - `Exit <status> code: <code>`
//! - `population, sec: <x>` / `population hit, sec: <x>`
//! - `hit, sec: <x>` / `miss, sec: <x>`
//! - `Working set ...: <n>`
//! - `New: | Alloc: | Free: | Grow: | Shrink: <count> times <size> bytes ...`

use crate::error::{Result, SummaryError};
use std::str::FromStr;

/// Token index of the run count on a `Testing:` line
const RUN_COUNT_TOKEN: usize = 7;

/// Suffix distinguishing pool-mode runs of the same test
pub const POOL_SUFFIX: &str = " pool";

/// Allocation event family reported by the harness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryEvent {
    /// Pool allocations, only honored in pool mode
    New,
    Alloc,
    Free,
    Grow,
    Shrink,
}

impl MemoryEvent {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "New:" => Some(Self::New),
            "Alloc:" => Some(Self::Alloc),
            "Free:" => Some(Self::Free),
            "Grow:" => Some(Self::Grow),
            "Shrink:" => Some(Self::Shrink),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New:",
            Self::Alloc => "Alloc:",
            Self::Free => "Free:",
            Self::Grow => "Grow:",
            Self::Shrink => "Shrink:",
        }
    }

    /// Name of the stat block this event feeds
    pub fn stat_name(self) -> &'static str {
        match self {
            Self::New | Self::Alloc => "alloc",
            Self::Free => "free",
            Self::Grow => "grow",
            Self::Shrink => "shrink",
        }
    }

    /// Whether this event is honored for a run in the given mode
    pub fn honored_in(self, pool: bool) -> bool {
        matches!(self, Self::New) == pool
    }
}

/// Header of a run block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestingLine {
    /// Display name, suffixed with `" pool"` for pool-mode runs
    pub name: String,
    /// Declared replication count
    pub run_count: u64,
    pub pool: bool,
    pub wrap_alloc: bool,
}

/// One classified log line
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Blank,
    Testing(TestingLine),
    DataSize(u64),
    /// Raw exit code token, validated by the aggregator
    Exit(String),
    Population(f64),
    PopulationHit(f64),
    Hit(f64),
    Miss(f64),
    WorkingSet(i64),
    Memory {
        event: MemoryEvent,
        count: u64,
        size: u64,
    },
    Other,
}

impl LineKind {
    /// Short label used in diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Testing(_) => "Testing:",
            Self::DataSize(_) => "Data size:",
            Self::Exit(_) => "Exit",
            Self::Population(_) => "population,",
            Self::PopulationHit(_) => "population hit",
            Self::Hit(_) => "hit,",
            Self::Miss(_) => "miss,",
            Self::WorkingSet(_) => "Working",
            Self::Memory { event, .. } => event.label(),
            Self::Other => "other",
        }
    }
}

/// Whitespace-split view of one line with positional parsing helpers
#[derive(Clone, Copy)]
struct Tokens<'a> {
    line_no: usize,
    kind: &'static str,
    tokens: &'a [&'a str],
}

impl<'a> Tokens<'a> {
    fn get(self, index: usize) -> Result<&'a str> {
        self.tokens
            .get(index)
            .copied()
            .ok_or(SummaryError::MissingToken {
                line: self.line_no,
                index: index + 1,
                kind: self.kind,
            })
    }

    fn parse<T: FromStr>(self, index: usize) -> Result<T> {
        let token = self.get(index)?;
        token.parse().map_err(|_| SummaryError::MalformedNumber {
            line: self.line_no,
            token: token.to_string(),
            index: index + 1,
        })
    }

    fn contains(self, literal: &str) -> bool {
        self.tokens.iter().any(|token| *token == literal)
    }
}

/// Classify one log line
///
/// `line_no` is 1-based and only used for error reporting.
pub fn classify(line_no: usize, text: &str) -> Result<LineKind> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let Some(&first) = tokens.first() else {
        return Ok(LineKind::Blank);
    };
    let tokens = tokens.as_slice();
    let view = move |kind: &'static str| Tokens {
        line_no,
        kind,
        tokens,
    };

    let classified = match first {
        "Testing:" => testing_line(view("Testing:"))?,
        _ if text.starts_with("Data size: ") => {
            LineKind::DataSize(view("Data size:").parse(2)?)
        }
        "Exit" => LineKind::Exit(view("Exit").get(3)?.to_string()),
        "population," => LineKind::Population(view("population,").parse(2)?),
        "population" => LineKind::PopulationHit(view("population hit").parse(3)?),
        "hit," => LineKind::Hit(view("hit,").parse(2)?),
        "miss," => LineKind::Miss(view("miss,").parse(2)?),
        "Working" => LineKind::WorkingSet(view("Working").parse(3)?),
        label => match MemoryEvent::from_label(label) {
            Some(event) => {
                let t = view(event.label());
                LineKind::Memory {
                    event,
                    count: t.parse(1)?,
                    size: t.parse(3)?,
                }
            }
            None => LineKind::Other,
        },
    };

    Ok(classified)
}

fn testing_line(t: Tokens<'_>) -> Result<LineKind> {
    let pool = t.contains("pool");
    let base = t.get(1)?;
    let name = if pool {
        format!("{base}{POOL_SUFFIX}")
    } else {
        base.to_string()
    };
    Ok(LineKind::Testing(TestingLine {
        name,
        run_count: t.parse(RUN_COUNT_TOKEN)?,
        pool,
        wrap_alloc: t.contains("wrap_alloc"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(classify(1, "").unwrap(), LineKind::Blank);
        assert_eq!(classify(1, "   \t ").unwrap(), LineKind::Blank);
    }

    #[test]
    fn test_testing_line() {
        let line = "Testing: btree_set max 1000000 bits 20 cnt 10";
        match classify(1, line).unwrap() {
            LineKind::Testing(t) => {
                assert_eq!(t.name, "btree_set");
                assert_eq!(t.run_count, 10);
                assert!(!t.pool);
                assert!(!t.wrap_alloc);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_testing_line_pool_suffix() {
        let line = "Testing: bitset max 255 bits 8 cnt 4 wrap_alloc pool";
        match classify(1, line).unwrap() {
            LineKind::Testing(t) => {
                assert_eq!(t.name, "bitset pool");
                assert!(t.pool);
                assert!(t.wrap_alloc);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_wrap_alloc_alone_is_not_pool() {
        let line = "Testing: bitset max 255 bits 8 cnt 4 wrap_alloc";
        match classify(1, line).unwrap() {
            LineKind::Testing(t) => {
                assert_eq!(t.name, "bitset");
                assert!(!t.pool);
                assert!(t.wrap_alloc);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_data_size_requires_prefix() {
        assert_eq!(
            classify(1, "Data size: 800 bytes 0 MB").unwrap(),
            LineKind::DataSize(800)
        );
        assert_eq!(classify(1, "Data sizes 800").unwrap(), LineKind::Other);
    }

    #[test]
    fn test_timing_lines() {
        assert_eq!(
            classify(1, "population, sec: 1.25").unwrap(),
            LineKind::Population(1.25)
        );
        assert_eq!(
            classify(1, "population hit, sec: 0.50").unwrap(),
            LineKind::PopulationHit(0.5)
        );
        assert_eq!(classify(1, "hit, sec: 0.10").unwrap(), LineKind::Hit(0.1));
        assert_eq!(classify(1, "miss, sec: 2").unwrap(), LineKind::Miss(2.0));
    }

    #[test]
    fn test_working_set() {
        assert_eq!(
            classify(1, "Working set size: 4096").unwrap(),
            LineKind::WorkingSet(4096)
        );
    }

    #[test]
    fn test_memory_lines() {
        assert_eq!(
            classify(1, "Alloc: 5 times 100 bytes 0 MB average 20 bytes").unwrap(),
            LineKind::Memory {
                event: MemoryEvent::Alloc,
                count: 5,
                size: 100
            }
        );
        assert_eq!(
            classify(1, "New: 3 bytes: 50").unwrap(),
            LineKind::Memory {
                event: MemoryEvent::New,
                count: 3,
                size: 50
            }
        );
    }

    #[test]
    fn test_exit_keeps_raw_code() {
        assert_eq!(
            classify(1, "Exit 0 code: 1").unwrap(),
            LineKind::Exit("1".to_string())
        );
    }

    #[test]
    fn test_unrelated_lines_are_other() {
        assert_eq!(classify(1, "hit count: 42").unwrap(), LineKind::Other);
        assert_eq!(classify(1, "Used: 0 bytes 0 MB").unwrap(), LineKind::Other);
        assert_eq!(
            classify(1, "Delete: 1 times 8 bytes").unwrap(),
            LineKind::Other
        );
        assert_eq!(classify(1, "Ratio: 1.500").unwrap(), LineKind::Other);
    }

    #[test]
    fn test_malformed_number() {
        let err = classify(7, "Alloc: five times 100 bytes").unwrap_err();
        match err {
            SummaryError::MalformedNumber { line, token, index } => {
                assert_eq!(line, 7);
                assert_eq!(token, "five");
                assert_eq!(index, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_token() {
        let err = classify(2, "Exit 0").unwrap_err();
        assert!(matches!(
            err,
            SummaryError::MissingToken {
                line: 2,
                index: 4,
                kind: "Exit"
            }
        ));
    }

    #[test]
    fn test_honored_in() {
        assert!(MemoryEvent::New.honored_in(true));
        assert!(!MemoryEvent::New.honored_in(false));
        assert!(MemoryEvent::Shrink.honored_in(false));
        assert!(!MemoryEvent::Alloc.honored_in(true));
    }
}
