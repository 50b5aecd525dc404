//! Display ↔ edit transitions through the binder.

use litebind_core::{
    Binder, BinderAction, BinderConfig, Document, Mode, RequestKind, Scalar, SourceState, Target,
    WidgetKind,
};
use litebind_harness::{MemoryDocument, NodeId, init_test_logging};
use serde_json::{Value, json};

struct Page {
    doc: MemoryDocument,
    scope: NodeId,
    title: NodeId,
    admin: NodeId,
    color: NodeId,
    size: NodeId,
}

fn page() -> Page {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let scope = doc.element(root, "section", &[], "");
    let title = doc.element(scope, "span", &[("name", "title")], "Hello");
    let admin = doc.element(scope, "span", &[("name", "admin"), ("class", "edit-checkbox")], "True");
    let color = doc.element(scope, "span", &[("name", "color")], "Blue");
    let size = doc.element(scope, "span", &[("name", "size"), ("class", "edit-radio")], "M");

    Page { doc, scope, title, admin, color, size }
}

fn binder(page: &Page, source: Value) -> Binder<NodeId> {
    let config = BinderConfig::from_value(json!({
        "getURL": "/api/page",
        "setURL": "/api/page",
        "type": "post",
        "viewSelector": "span",
        "getOnInit": false,
        "source": source,
    }))
    .unwrap();

    let mut binder = Binder::new(config, page.scope);
    binder.start(&page.doc);
    binder
}

fn inline_source() -> Value {
    json!({
        "color": {"1": "Red", "2": "Blue"},
        "size": {"s": "S", "m": "M", "l": "L"},
    })
}

fn widget_for(binder: &Binder<NodeId>, key: &str) -> (NodeId, WidgetKind) {
    let view = binder.registry().with_key(key).next().unwrap();
    (view.node(), view.kind())
}

#[test]
fn text_round_trip_moves_the_key() {
    init_test_logging();
    let mut page = page();
    let mut binder = binder(&page, inline_source());

    binder.set_edit_mode(&mut page.doc, &Target::Keys(vec!["title".into()]));

    let (widget, kind) = widget_for(&binder, "title");
    assert_eq!(kind, WidgetKind::Text);
    assert_eq!(page.doc.parent(widget), Some(page.title));
    assert_eq!(page.doc.value(widget), "Hello");
    assert_eq!(page.doc.attribute(widget, "name").as_deref(), Some("title"));
    assert_eq!(page.doc.attribute(page.title, "name"), None);
    assert_eq!(page.doc.text(page.title), "");

    page.doc.set_value(widget, "Bye");
    binder.set_display_mode(&mut page.doc, &Target::All);

    let (node, kind) = widget_for(&binder, "title");
    assert_eq!((node, kind), (page.title, WidgetKind::PlainDisplay));
    assert_eq!(page.doc.text(page.title), "Bye");
    assert_eq!(page.doc.attribute(page.title, "name").as_deref(), Some("title"));
    assert!(!page.doc.is_attached(widget));
}

#[test]
fn only_targeted_views_change() {
    let mut page = page();
    let mut binder = binder(&page, inline_source());

    binder.set_edit_mode(&mut page.doc, &Target::Nodes(vec![page.title]));

    let modes: Vec<Mode> = binder.registry().iter().map(|view| view.mode()).collect();
    assert_eq!(modes, [Mode::Edit, Mode::Display, Mode::Display, Mode::Display]);
}

#[test]
fn selector_targets_match_display_nodes() {
    let mut page = page();
    let mut binder = binder(&page, inline_source());

    binder.set_edit_mode(&mut page.doc, &Target::Selector(".edit-checkbox".into()));

    assert_eq!(widget_for(&binder, "admin").1, WidgetKind::Checkbox);
    assert_eq!(widget_for(&binder, "title").1, WidgetKind::PlainDisplay);
}

#[test]
fn checkbox_round_trip_uses_display_labels() {
    let mut page = page();
    let mut binder = binder(&page, inline_source());

    binder.set_edit_mode(&mut page.doc, &Target::All);
    let (widget, kind) = widget_for(&binder, "admin");
    assert_eq!(kind, WidgetKind::Checkbox);
    assert!(page.doc.is_checked(widget));

    page.doc.set_checked(widget, false);
    binder.set_display_mode(&mut page.doc, &Target::All);

    assert_eq!(page.doc.text(page.admin), "False");
    assert_eq!(widget_for(&binder, "admin"), (page.admin, WidgetKind::CheckboxDisplay));
}

#[test]
fn dropdown_round_trip() {
    let mut page = page();
    let mut binder = binder(&page, inline_source());

    binder.set_edit_mode(&mut page.doc, &Target::All);
    let (widget, kind) = widget_for(&binder, "color");
    assert_eq!(kind, WidgetKind::Select);
    assert_eq!(page.doc.selected_choice(widget).map(|c| c.value), Some("2".to_string()));
    assert_eq!(binder.collect_payload(&page.doc)["color"], Scalar::from("2"));

    page.doc.select_choice(widget, "1");
    binder.set_display_mode(&mut page.doc, &Target::All);

    assert_eq!(page.doc.text(page.color), "Red");
}

#[test]
fn radio_marker_yields_radio_group() {
    let mut page = page();
    let mut binder = binder(&page, inline_source());

    binder.set_edit_mode(&mut page.doc, &Target::Keys(vec!["size".into()]));
    let (widget, kind) = widget_for(&binder, "size");
    assert_eq!(kind, WidgetKind::RadioGroup);
    assert_eq!(page.doc.selected_choice(widget).map(|c| c.value), Some("m".to_string()));

    binder.set_display_mode(&mut page.doc, &Target::All);
    assert_eq!(page.doc.text(page.size), "M");
}

#[test]
fn fetch_writes_into_edit_widgets() {
    let mut page = page();
    let mut binder = binder(&page, inline_source());
    binder.set_edit_mode(&mut page.doc, &Target::All);

    let Some(BinderAction::Send(request)) = binder.get(&page.doc, None).pop() else {
        panic!("fetch expected");
    };
    binder
        .handle_response(&mut page.doc, request.id, &json!({"title": "X", "color": "1"}))
        .unwrap();

    let (title, _) = widget_for(&binder, "title");
    let (color, _) = widget_for(&binder, "color");
    assert_eq!(page.doc.value(title), "X");
    assert_eq!(page.doc.selected_choice(color).map(|c| c.label), Some("Red".to_string()));
}

#[test]
fn repeated_transitions_are_no_ops() {
    let mut page = page();
    let mut binder = binder(&page, inline_source());

    binder.set_edit_mode(&mut page.doc, &Target::All);
    let first: Vec<NodeId> = binder.registry().iter().map(|view| view.node()).collect();
    binder.set_edit_mode(&mut page.doc, &Target::All);
    let second: Vec<NodeId> = binder.registry().iter().map(|view| view.node()).collect();

    assert_eq!(first, second);
    assert_eq!(page.doc.children(page.title).len(), 1);

    binder.set_display_mode(&mut page.doc, &Target::All);
    binder.set_display_mode(&mut page.doc, &Target::All);
    assert_eq!(page.doc.text(page.title), "Hello");
    assert_eq!(binder.registry().len(), 4);
}

#[test]
fn refresh_after_edit_keeps_one_view_per_key() {
    let mut page = page();
    let mut binder = binder(&page, inline_source());

    binder.set_edit_mode(&mut page.doc, &Target::All);
    binder.refresh(&page.doc);

    // Edit widgets are not spans, and the containers lost their key.
    assert!(binder.registry().is_empty());

    let config =
        BinderConfig::from_value(json!({"viewSelector": "span, input, select, radio-group"}))
            .unwrap();
    let mut wide = Binder::new(config, page.scope);
    wide.start(&page.doc);
    assert_eq!(wide.registry().len(), 4);
    assert!(wide.registry().duplicate_keys().is_empty());
}

#[test]
fn unresolved_source_falls_back_to_text_fields() {
    let mut page = page();
    let mut binder = binder(&page, json!("/api/sources"));
    assert!(!binder.source().is_resolved());

    let actions = binder.set_edit_mode(&mut page.doc, &Target::All);
    let [BinderAction::Send(request)] = actions.as_slice() else {
        panic!("source retry expected, got {actions:?}");
    };
    assert_eq!(request.kind, RequestKind::Source);
    assert_eq!(widget_for(&binder, "color").1, WidgetKind::Text);
    assert_eq!(widget_for(&binder, "admin").1, WidgetKind::Checkbox);

    binder.handle_response(&mut page.doc, request.id, &inline_source()).unwrap();
    assert!(matches!(binder.source().state(), SourceState::Resolved(_)));

    binder.set_display_mode(&mut page.doc, &Target::All);
    assert!(binder.set_edit_mode(&mut page.doc, &Target::All).is_empty());
    assert_eq!(widget_for(&binder, "color").1, WidgetKind::Select);
}

#[test]
fn empty_source_response_keeps_retrying() {
    let mut page = page();
    let mut binder = binder(&page, json!("/api/sources"));

    let actions = binder.resolve_sources();
    let [BinderAction::Send(first)] = actions.as_slice() else {
        panic!("source request expected");
    };
    binder.handle_response(&mut page.doc, first.id, &json!({})).unwrap();

    assert!(!binder.source().is_resolved());
    assert_eq!(binder.resolve_sources().len(), 1);
}
