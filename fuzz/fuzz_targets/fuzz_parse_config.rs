//! Fuzz target for running-config parsing.
//!
//! Feeds arbitrary bytes through `parse_bytes`. The parser must never panic:
//! invalid input is an `InputError`, everything else a device plus warnings.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(output) = iosparse::parse_bytes(data) {
        // Every warning must point at a real line of the input.
        let lines = data.split(|b| *b == b'\n').count();
        for warning in &output.warnings {
            assert!(warning.line >= 1 && warning.line <= lines);
        }
    }
});
