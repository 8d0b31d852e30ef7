#![no_main]

use benchfold::{aggregate_reader, csv_output, AggregatorConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(summary) = aggregate_reader(data, AggregatorConfig::lenient()) {
        let _ = csv_output::render(&summary);
    }
});
