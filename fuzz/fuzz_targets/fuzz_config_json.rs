//! Fuzz target: `MemoryConfig::load` (stored config JSON)
//!
//! Invariants checked:
//! - No panics under arbitrary JSON text
//! - Any config that loads also passes `validate_config`
//! - A loaded config saves and reloads unchanged
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use krishimitra::adapters::config_store::MemoryConfig;
use krishimitra::app::ports::ConfigPort;
use krishimitra::config::validate_config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(cfg) = MemoryConfig::with_json(json).load() else {
        return;
    };
    assert!(validate_config(&cfg).is_ok());

    let store = MemoryConfig::new();
    store.save(&cfg).expect("valid config saves");
    assert_eq!(store.load().expect("saved config loads"), cfg);
});
