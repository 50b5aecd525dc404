//! Arbitrary fetch and source responses must apply without panicking and
//! leave every view registered.

#![no_main]

use libfuzzer_sys::fuzz_target;
use litebind_core::{Binder, BinderAction, BinderConfig, Target};
use litebind_harness::MemoryDocument;
use serde_json::{Value, json};

fuzz_target!(|data: &[u8]| {
    let Ok(response) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    let mut doc = MemoryDocument::new();
    let root = doc.root();
    doc.element(root, "span", &[("name", "a")], "x");
    doc.element(root, "span", &[("name", "b"), ("class", "edit-checkbox")], "True");
    doc.input(root, "text", &[("name", "c")], "");
    doc.checkbox(root, &[("name", "d")], false);
    doc.select(root, &[("name", "e")], &[("1", "One"), ("2", "Two")]);
    doc.radio_group(root, &[("name", "f")], &[("1", "One")]);

    let Ok(config) = BinderConfig::from_value(json!({
        "getURL": "/get",
        "viewSelector": "*",
        "source": "/source",
        "getOnInit": false,
    })) else {
        return;
    };
    let mut binder = Binder::new(config, root);
    binder.start(&doc);
    let before = binder.registry().len();

    for BinderAction::Send(request) in binder.get(&doc, None) {
        let _ = binder.handle_response(&mut doc, request.id, &response);
    }
    binder.set_edit_mode(&mut doc, &Target::All);
    binder.set_display_mode(&mut doc, &Target::All);

    assert_eq!(binder.registry().len(), before);
});
