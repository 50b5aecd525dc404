//! Display ↔ edit transitions.
//!
//! # State Machine
//!
//! ```text
//!            to_edit
//! ┌─────────┐───────>┌──────┐
//! │ Display │        │ Edit │
//! └─────────┘<───────└──────┘
//!           to_display
//! ```
//!
//! Each view is in exactly one mode. A transition replaces the view with a
//! new one on a different node and always carries the key across. Views
//! already in the target mode are left untouched.
//!
//! `to_edit` empties the display element, strips its key, and appends the
//! new widget as its child. `to_display` writes the widget's rendered value
//! into the parent, moves the key back onto it, and removes the widget.

use tracing::debug;

use crate::{
    document::{Choice, Document, EDIT_CHECKBOX_CLASS, EDIT_RADIO_CLASS, WidgetSpec},
    payload::Scalar,
    source::SourceResolver,
    transducer::{ValueTransducer, checkbox_truthy},
    view::{Mode, View, WidgetKind},
};

/// Markers read from a display element before it becomes editable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditMarkers {
    /// Element prefers a radio group over a dropdown
    pub radio: bool,
    /// Element renders a boolean
    pub checkbox: bool,
}

/// Performs mode transitions for one binder.
#[derive(Debug, Clone, Copy)]
pub struct ModeTransition<'a> {
    source: &'a SourceResolver,
    key_attr: &'a str,
    true_display: &'a str,
    false_display: &'a str,
}

impl<'a> ModeTransition<'a> {
    /// Create a transition helper.
    pub fn new(
        source: &'a SourceResolver,
        key_attr: &'a str,
        true_display: &'a str,
        false_display: &'a str,
    ) -> Self {
        Self { source, key_attr, true_display, false_display }
    }

    /// Decide which widget replaces a display element.
    ///
    /// In order: a source entry for the key yields a radio group (with the
    /// radio marker) or a dropdown, pre-selecting the first choice whose
    /// value or label equals the displayed text; otherwise the checkbox
    /// marker yields a checkbox; otherwise a text field seeded with the text.
    pub fn plan(&self, key: &str, text: &str, markers: EditMarkers) -> WidgetSpec {
        if let Some(options) = self.source.choices(key) {
            let shown = text.trim();
            let mut matched = false;
            let choices = options
                .iter()
                .map(|(value, label)| {
                    let mut choice = Choice::new(value.as_str(), label.as_str());
                    if !matched && (value == shown || label == shown) {
                        choice.selected = true;
                        matched = true;
                    }
                    choice
                })
                .collect();

            return if markers.radio {
                WidgetSpec::RadioGroup { choices }
            } else {
                WidgetSpec::Select { choices }
            };
        }

        if markers.checkbox {
            return WidgetSpec::Checkbox { checked: self.seed_checked(text) };
        }

        WidgetSpec::Text { value: text.to_string() }
    }

    /// Turn a display view into an editable one.
    ///
    /// Returns the replacement view, or `None` if the view is already in
    /// edit mode.
    pub fn to_edit<D: Document>(&self, doc: &mut D, view: &View<D::Node>) -> Option<View<D::Node>> {
        if view.mode() != Mode::Display {
            return None;
        }

        let container = view.node();
        let markers = EditMarkers {
            radio: doc.has_class(container, EDIT_RADIO_CLASS),
            checkbox: doc.has_class(container, EDIT_CHECKBOX_CLASS),
        };
        let text = doc.text(container);
        let spec = self.plan(view.key(), &text, markers);
        let kind = match &spec {
            WidgetSpec::Text { .. } => WidgetKind::Text,
            WidgetSpec::Checkbox { .. } => WidgetKind::Checkbox,
            WidgetSpec::Select { .. } => WidgetKind::Select,
            WidgetSpec::RadioGroup { .. } => WidgetKind::RadioGroup,
        };

        let widget = doc.create_widget(&spec);
        doc.set_attribute(widget, self.key_attr, view.key());
        doc.remove_attribute(container, self.key_attr);
        doc.set_text(container, "");
        doc.append_child(container, widget);

        debug!(key = view.key(), ?kind, "view entered edit mode");
        Some(View::new(widget, view.key(), kind))
    }

    /// Turn an editable view back into a display element.
    ///
    /// Returns the replacement view backed by the widget's parent, or `None`
    /// if the view is already in display mode or the widget is detached.
    pub fn to_display<D: Document>(
        &self,
        doc: &mut D,
        view: &View<D::Node>,
    ) -> Option<View<D::Node>> {
        if view.mode() != Mode::Edit {
            return None;
        }

        let widget = view.node();
        let Some(container) = doc.parent(widget) else {
            debug!(key = view.key(), "widget has no parent, staying in edit mode");
            return None;
        };

        let transducer = ValueTransducer::new(self.source, self.true_display, self.false_display);
        let text = transducer.display_text(doc, view);

        doc.remove(widget);
        doc.set_text(container, &text);
        doc.set_attribute(container, self.key_attr, view.key());

        let kind = match WidgetKind::classify(doc, container) {
            kind @ (WidgetKind::PlainDisplay | WidgetKind::CheckboxDisplay) => kind,
            _ => WidgetKind::PlainDisplay,
        };

        debug!(key = view.key(), ?kind, "view entered display mode");
        Some(View::new(container, view.key(), kind))
    }

    /// Initial checkbox state for a displayed boolean.
    ///
    /// The configured labels are recognized first so a round trip through
    /// edit mode reproduces the same text; any other text follows the
    /// checkbox truthiness rule.
    fn seed_checked(&self, text: &str) -> bool {
        let shown = text.trim();
        if shown == self.true_display {
            true
        } else if shown == self.false_display {
            false
        } else {
            checkbox_truthy(&Scalar::from(shown))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SourceSpec,
        source::{Choices, SourceMap},
    };

    fn resolver() -> SourceResolver {
        let mut choices = Choices::new();
        choices.insert("1".into(), "Red".into());
        choices.insert("2".into(), "Blue".into());
        let mut map = SourceMap::new();
        map.insert("color".into(), choices);
        SourceResolver::new(Some(SourceSpec::Inline(map)))
    }

    fn selected(spec: &WidgetSpec) -> Vec<&str> {
        let choices = match spec {
            WidgetSpec::Select { choices } | WidgetSpec::RadioGroup { choices } => choices,
            WidgetSpec::Text { .. } | WidgetSpec::Checkbox { .. } => return Vec::new(),
        };
        choices.iter().filter(|c| c.selected).map(|c| c.value.as_str()).collect()
    }

    #[test]
    fn source_entry_yields_select_preselected_by_label() {
        let source = resolver();
        let transition = ModeTransition::new(&source, "name", "True", "False");

        let spec = transition.plan("color", "Blue", EditMarkers::default());
        assert!(matches!(spec, WidgetSpec::Select { .. }));
        assert_eq!(selected(&spec), ["2"]);
    }

    #[test]
    fn source_entry_preselects_by_value() {
        let source = resolver();
        let transition = ModeTransition::new(&source, "name", "True", "False");

        let spec = transition.plan("color", " 1 ", EditMarkers::default());
        assert_eq!(selected(&spec), ["1"]);
    }

    #[test]
    fn radio_marker_yields_radio_group() {
        let source = resolver();
        let transition = ModeTransition::new(&source, "name", "True", "False");

        let markers = EditMarkers { radio: true, checkbox: true };
        let spec = transition.plan("color", "Red", markers);
        assert!(matches!(spec, WidgetSpec::RadioGroup { .. }));
        assert_eq!(selected(&spec), ["1"]);
    }

    #[test]
    fn checkbox_marker_without_source_entry() {
        let source = resolver();
        let transition = ModeTransition::new(&source, "name", "Yes", "No");
        let markers = EditMarkers { radio: false, checkbox: true };

        assert_eq!(transition.plan("done", "Yes", markers), WidgetSpec::Checkbox { checked: true });
        assert_eq!(transition.plan("done", "No", markers), WidgetSpec::Checkbox { checked: false });
        assert_eq!(transition.plan("done", "0", markers), WidgetSpec::Checkbox { checked: false });
        assert_eq!(transition.plan("done", "x", markers), WidgetSpec::Checkbox { checked: true });
    }

    #[test]
    fn plain_text_by_default() {
        let source = resolver();
        let transition = ModeTransition::new(&source, "name", "True", "False");

        assert_eq!(
            transition.plan("title", " Hello ", EditMarkers::default()),
            WidgetSpec::Text { value: " Hello ".into() }
        );
    }

    #[test]
    fn unresolved_source_means_no_choice() {
        let source = SourceResolver::new(Some(SourceSpec::Url("/sources".into())));
        let transition = ModeTransition::new(&source, "name", "True", "False");

        assert_eq!(
            transition.plan("color", "Red", EditMarkers::default()),
            WidgetSpec::Text { value: "Red".into() }
        );
    }
}
