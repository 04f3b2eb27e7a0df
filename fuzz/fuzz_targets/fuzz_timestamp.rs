//! Fuzz target: date parsing and display formatting
//!
//! Invariants checked:
//! - No panics under arbitrary strings
//! - `format_date` and `format_date_time` accept exactly the same inputs
//!
//! cargo fuzz run fuzz_timestamp

#![no_main]

use krishimitra::format::{format_date, format_date_time, parse_timestamp};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let parsed = parse_timestamp(input).is_ok();
    assert_eq!(format_date(input).is_ok(), parsed);
    assert_eq!(format_date_time(input).is_ok(), parsed);
});
