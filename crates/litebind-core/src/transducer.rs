//! Per-widget-kind value conversion.
//!
//! [`ValueTransducer::apply`] writes a raw payload value into a view and
//! [`ValueTransducer::extract`] reads it back. Both dispatch on the view's
//! [`WidgetKind`]; the node is never re-inspected.

use tracing::debug;

use crate::{
    config::Method,
    document::Document,
    payload::Scalar,
    source::SourceResolver,
    view::{View, WidgetKind},
};

/// Checkbox rule: truthy iff non-empty, not numerically zero, and not
/// `"false"` in any letter case.
pub fn checkbox_truthy(raw: &Scalar) -> bool {
    !raw.is_empty() && !raw.is_numeric_zero() && !raw.text().eq_ignore_ascii_case("false")
}

/// Checkbox-display rule: truthy iff non-empty and not `"false"` in any
/// letter case. Numeric zero is not special here.
pub fn display_truthy(raw: &Scalar) -> bool {
    !raw.is_empty() && !raw.text().eq_ignore_ascii_case("false")
}

/// Prepare an extracted value for submission.
///
/// Under `GET` textual values are percent-encoded, since they end up in the
/// request URI. Booleans, numbers and `null` pass through unchanged, as does
/// every value under any other method.
pub fn encode_for_method(value: Scalar, method: Method) -> Scalar {
    match value {
        Scalar::Text(text) if method.is_get() => Scalar::Text(urlencoding::encode(&text).into_owned()),
        other => other,
    }
}

/// Converts between raw scalars and rendered widget state.
#[derive(Debug, Clone, Copy)]
pub struct ValueTransducer<'a> {
    source: &'a SourceResolver,
    true_display: &'a str,
    false_display: &'a str,
}

impl<'a> ValueTransducer<'a> {
    /// Create a transducer reading choices from `source` and rendering
    /// checkbox displays with the given labels.
    pub fn new(source: &'a SourceResolver, true_display: &'a str, false_display: &'a str) -> Self {
        Self { source, true_display, false_display }
    }

    /// Write `raw` into the view.
    ///
    /// Returns false when nothing could be written: a dropdown whose key or
    /// option is missing from the source, or a choice widget without a
    /// matching option. These misses are silent by contract.
    pub fn apply<D: Document>(&self, doc: &mut D, view: &View<D::Node>, raw: &Scalar) -> bool {
        let node = view.node();
        match view.kind() {
            WidgetKind::Select => {
                let Some(label) = self.source.lookup(view.key(), &raw.text()) else {
                    debug!(key = view.key(), option = %raw, "no source entry for dropdown value");
                    return false;
                };
                select_by_value_or_label(doc, node, label)
            },
            WidgetKind::Checkbox => {
                doc.set_checked(node, checkbox_truthy(raw));
                true
            },
            WidgetKind::RadioGroup => {
                let selected = doc.select_choice(node, &raw.text());
                if !selected {
                    debug!(key = view.key(), value = %raw, "no radio item with this value");
                }
                selected
            },
            WidgetKind::Text => {
                doc.set_value(node, &raw.text());
                true
            },
            WidgetKind::CheckboxDisplay => {
                let label =
                    if display_truthy(raw) { self.true_display } else { self.false_display };
                doc.set_text(node, label);
                true
            },
            WidgetKind::PlainDisplay => {
                doc.set_text(node, &raw.text());
                true
            },
        }
    }

    /// Read the view's current value.
    ///
    /// Checkboxes yield a boolean, choice widgets the selected choice's value
    /// (`null` when nothing is selected), text fields their value and display
    /// elements their text.
    pub fn extract<D: Document>(&self, doc: &D, view: &View<D::Node>) -> Scalar {
        let node = view.node();
        match view.kind() {
            WidgetKind::Checkbox => Scalar::Bool(doc.is_checked(node)),
            WidgetKind::RadioGroup | WidgetKind::Select => {
                doc.selected_choice(node).map_or(Scalar::Null, |choice| Scalar::Text(choice.value))
            },
            WidgetKind::Text => Scalar::Text(doc.value(node)),
            WidgetKind::PlainDisplay | WidgetKind::CheckboxDisplay => Scalar::Text(doc.text(node)),
        }
    }

    /// Text a widget shows once turned back into a display element.
    ///
    /// Choice widgets render the selected choice's label and checkboxes the
    /// true/false labels. Display kinds render their current text.
    pub fn display_text<D: Document>(&self, doc: &D, view: &View<D::Node>) -> String {
        let node = view.node();
        match view.kind() {
            WidgetKind::Select | WidgetKind::RadioGroup => {
                doc.selected_choice(node).map(|choice| choice.label).unwrap_or_default()
            },
            WidgetKind::Checkbox => {
                let label =
                    if doc.is_checked(node) { self.true_display } else { self.false_display };
                label.to_string()
            },
            WidgetKind::Text => doc.value(node),
            WidgetKind::PlainDisplay | WidgetKind::CheckboxDisplay => doc.text(node),
        }
    }
}

/// Select the option whose value is `target`, falling back to the option
/// labelled `target` so dropdowns built from the source (value = option key)
/// still resolve.
fn select_by_value_or_label<D: Document>(doc: &mut D, node: D::Node, target: &str) -> bool {
    if doc.select_choice(node, target) {
        return true;
    }

    let by_label = doc.choices(node).into_iter().find(|choice| choice.label == target);
    match by_label {
        Some(choice) => doc.select_choice(node, &choice.value),
        None => {
            debug!(option = target, "dropdown has no matching option");
            false
        },
    }
}
