#![no_main]

use benchfold::line::classify;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Classification must return an error, never panic
        let _ = classify(1, input);
    }
});
