//! Presentation tree abstraction.
//!
//! The binder never manipulates a concrete tree. Everything it needs from
//! the presentation layer goes through [`Document`]: scoped queries, key
//! attributes, text content, widget state, and creating or removing the
//! widgets used in edit mode.
//!
//! Selector syntax is owned by the implementation. The binder only builds
//! selectors by appending an attribute-existence filter (`[key]`) to each
//! clause of the configured selector.

use std::{fmt, hash::Hash};

/// Marker class requesting a radio group instead of a dropdown in edit mode.
pub const EDIT_RADIO_CLASS: &str = "edit-radio";

/// Marker class flagging a display element as checkbox-like.
pub const EDIT_CHECKBOX_CLASS: &str = "edit-checkbox";

/// Structural shape of a node.
///
/// Consulted once when a view is registered; afterwards the view carries a
/// [`crate::WidgetKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    /// Single-line or multi-line text input (any non-choice input)
    TextField,
    /// Checkbox input
    Checkbox,
    /// Group of mutually exclusive radio items
    RadioGroup,
    /// Dropdown
    Select,
    /// Non-editable element
    Element,
}

/// One option of a dropdown or one item of a radio group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Underlying value submitted for this choice
    pub value: String,
    /// Label shown to the user
    pub label: String,
    /// Whether this choice is currently selected
    pub selected: bool,
}

impl Choice {
    /// Unselected choice.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into(), selected: false }
    }
}

/// Description of an editable widget to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetSpec {
    /// Text field seeded with a value
    Text {
        /// Initial value
        value: String,
    },
    /// Checkbox with an initial checked state
    Checkbox {
        /// Initial state
        checked: bool,
    },
    /// Dropdown with ordered options
    Select {
        /// Options, at most one selected
        choices: Vec<Choice>,
    },
    /// Radio group with ordered items
    RadioGroup {
        /// Items, at most one selected
        choices: Vec<Choice>,
    },
}

/// Presentation tree the binder operates on.
///
/// Implementations must not panic on stale or foreign node handles; reads
/// return empty values and writes are ignored.
pub trait Document {
    /// Handle to a node. Cheap to copy and usable as a map key.
    type Node: Copy + Eq + Hash + fmt::Debug;

    /// Descendants of `scope` matching `selector`, in document order.
    ///
    /// A malformed selector matches nothing.
    fn query(&self, scope: Self::Node, selector: &str) -> Vec<Self::Node>;

    /// Whether `node` itself matches `selector`.
    fn matches(&self, node: Self::Node, selector: &str) -> bool;

    /// Structural shape of the node.
    fn shape(&self, node: Self::Node) -> NodeShape;

    /// Whether the node carries a marker class.
    fn has_class(&self, node: Self::Node, class: &str) -> bool;

    /// Attribute value, if present.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;

    /// Set an attribute.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// Remove an attribute.
    fn remove_attribute(&mut self, node: Self::Node, name: &str);

    /// Text content of the node and its descendants.
    fn text(&self, node: Self::Node) -> String;

    /// Replace the node's children with a single text.
    fn set_text(&mut self, node: Self::Node, text: &str);

    /// Current value of a text field.
    fn value(&self, node: Self::Node) -> String;

    /// Set the current value of a text field.
    fn set_value(&mut self, node: Self::Node, value: &str);

    /// Checked state of a checkbox.
    fn is_checked(&self, node: Self::Node) -> bool;

    /// Set the checked state of a checkbox.
    fn set_checked(&mut self, node: Self::Node, checked: bool);

    /// Options of a dropdown or items of a radio group, in order.
    fn choices(&self, node: Self::Node) -> Vec<Choice>;

    /// Select the choice whose value equals `value` exactly, deselecting the
    /// others. Returns false, changing nothing, if no choice matches.
    fn select_choice(&mut self, node: Self::Node, value: &str) -> bool;

    /// Currently selected choice.
    fn selected_choice(&self, node: Self::Node) -> Option<Choice> {
        self.choices(node).into_iter().find(|choice| choice.selected)
    }

    /// Parent node, if attached.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Create a detached widget.
    fn create_widget(&mut self, spec: &WidgetSpec) -> Self::Node;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Detach and drop a node with its descendants.
    fn remove(&mut self, node: Self::Node);
}
