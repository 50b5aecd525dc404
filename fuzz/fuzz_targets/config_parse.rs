//! Arbitrary option documents must parse or fail cleanly, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use litebind_core::{BinderConfig, SourceResolver};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = BinderConfig::from_json(text) {
        let source = SourceResolver::new(config.source.clone());
        if config.source.is_none() {
            assert!(source.is_resolved());
        }
    }
});
