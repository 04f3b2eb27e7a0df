//! Fuzz target: `count_alerts` (alerts response body)
//!
//! Feeds arbitrary bodies through both counting strategies.
//!
//! Invariants checked:
//! - No panics under any body
//! - A marker count never exceeds `body.len() / marker.len()`
//! - The JSON strategy equals the marker count whenever the body is not JSON
//!
//! cargo fuzz run fuzz_alert_count

#![no_main]

use krishimitra::app::alerts::{AlertCounting, DEFAULT_ALERT_MARKER, count_alerts};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(body) = std::str::from_utf8(data) else {
        return;
    };

    let marker = count_alerts(&AlertCounting::default(), body);
    assert!(marker <= body.len() / DEFAULT_ALERT_MARKER.len());

    let json = count_alerts(
        &AlertCounting::JsonField {
            field: "count".into(),
            fallback_marker: DEFAULT_ALERT_MARKER.into(),
        },
        body,
    );
    if cannot_be_json_object(body) {
        assert_eq!(json, marker, "non-JSON bodies fall back to the marker");
    }
});

fn cannot_be_json_object(body: &str) -> bool {
    !body.trim_start().starts_with('{')
}
