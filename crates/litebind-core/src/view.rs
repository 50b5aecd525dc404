//! Bound views and their widget kinds.

use crate::document::{Document, EDIT_CHECKBOX_CLASS, NodeShape};

/// Whether a view is a static display element or an editable widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Non-editable element rendering a value as text
    Display,
    /// Editable widget
    Edit,
}

/// Closed set of widget kinds a view can have.
///
/// Assigned once, when the view is registered or produced by a mode
/// transition. All value conversion dispatches on this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Text field
    Text,
    /// Checkbox
    Checkbox,
    /// Radio group
    RadioGroup,
    /// Dropdown
    Select,
    /// Display element rendering text
    PlainDisplay,
    /// Display element rendering a boolean with the true/false labels
    CheckboxDisplay,
}

impl WidgetKind {
    /// Classify a node.
    pub fn classify<D: Document>(doc: &D, node: D::Node) -> Self {
        match doc.shape(node) {
            NodeShape::TextField => Self::Text,
            NodeShape::Checkbox => Self::Checkbox,
            NodeShape::RadioGroup => Self::RadioGroup,
            NodeShape::Select => Self::Select,
            NodeShape::Element if doc.has_class(node, EDIT_CHECKBOX_CLASS) => {
                Self::CheckboxDisplay
            },
            NodeShape::Element => Self::PlainDisplay,
        }
    }

    /// Mode implied by the kind.
    pub fn mode(self) -> Mode {
        match self {
            Self::PlainDisplay | Self::CheckboxDisplay => Mode::Display,
            Self::Text | Self::Checkbox | Self::RadioGroup | Self::Select => Mode::Edit,
        }
    }

    /// Whether source map entries apply to this kind.
    pub fn supports_choices(self) -> bool {
        matches!(self, Self::Select | Self::RadioGroup)
    }
}

/// A bound presentation unit: one node, one key, one widget kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<N> {
    node: N,
    key: String,
    kind: WidgetKind,
}

impl<N: Copy> View<N> {
    /// Create a view.
    pub fn new(node: N, key: impl Into<String>, kind: WidgetKind) -> Self {
        Self { node, key: key.into(), kind }
    }

    /// Backing node.
    pub fn node(&self) -> N {
        self.node
    }

    /// Key correlating the view with payload and source entries.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Widget kind.
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// Current mode, derived from the kind.
    pub fn mode(&self) -> Mode {
        self.kind.mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_kinds_are_display_mode() {
        assert_eq!(WidgetKind::PlainDisplay.mode(), Mode::Display);
        assert_eq!(WidgetKind::CheckboxDisplay.mode(), Mode::Display);
    }

    #[test]
    fn input_kinds_are_edit_mode() {
        for kind in [
            WidgetKind::Text,
            WidgetKind::Checkbox,
            WidgetKind::RadioGroup,
            WidgetKind::Select,
        ] {
            assert_eq!(kind.mode(), Mode::Edit);
        }
    }

    #[test]
    fn only_choice_widgets_support_choices() {
        assert!(WidgetKind::Select.supports_choices());
        assert!(WidgetKind::RadioGroup.supports_choices());
        assert!(!WidgetKind::Text.supports_choices());
        assert!(!WidgetKind::CheckboxDisplay.supports_choices());
    }

    #[test]
    fn view_mode_follows_kind() {
        let view = View::new(7_u32, "title", WidgetKind::PlainDisplay);
        assert_eq!(view.node(), 7);
        assert_eq!(view.key(), "title");
        assert_eq!(view.mode(), Mode::Display);
    }
}
