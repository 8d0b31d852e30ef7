//! CSV-like summary output
//!
//! Header line `runCount,dataSize`, then one row per test in first-seen order.
//! Unset values render as empty fields.

use crate::record::Summary;

/// CSV summary formatter
#[derive(Debug)]
pub struct CsvSummaryOutput<'a> {
    summary: &'a Summary,
}

impl<'a> CsvSummaryOutput<'a> {
    /// Create a formatter over a finished summary
    pub fn new(summary: &'a Summary) -> Self {
        Self { summary }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.summary.header_csv());
        output.push('\n');

        for record in &self.summary.records {
            output.push_str(&record.render_csv());
            output.push('\n');
        }

        output
    }
}

/// Render a summary in the CSV-like format
pub fn render(summary: &Summary) -> String {
    CsvSummaryOutput::new(summary).to_csv()
}
