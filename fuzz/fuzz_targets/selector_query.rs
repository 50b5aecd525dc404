//! Arbitrary selectors and key names must never panic the scan.

#![no_main]

use libfuzzer_sys::fuzz_target;
use litebind_core::{Document, ViewRegistry, expand_selector};
use litebind_harness::MemoryDocument;

fuzz_target!(|input: (&str, &str)| {
    let (selector, key) = input;

    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let span = doc.element(root, "span", &[("name", "a"), ("class", "x y")], "");
    doc.input(span, "text", &[("name", "b"), ("id", "i")], "");

    let expanded = expand_selector(selector, key);
    let matched = doc.query(root, &expanded);
    let registry = ViewRegistry::scan(&doc, root, selector, key);
    assert!(registry.len() <= matched.len());
});
