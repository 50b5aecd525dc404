//! In-memory presentation tree.
//!
//! [`MemoryDocument`] is an arena of element nodes implementing
//! [`Document`]. It models just enough of a browser DOM for the binder:
//! attributes, own text, form control state, and parent/child links.
//!
//! Form controls are recognized by tag:
//!
//! | tag                      | shape        |
//! |--------------------------|--------------|
//! | `input[type=checkbox]`   | Checkbox     |
//! | other `input`, `textarea`| TextField    |
//! | `select`                 | Select       |
//! | `radio-group`            | RadioGroup   |
//! | anything else            | Element      |
//!
//! Removed nodes stay in the arena so stale handles remain harmless.

use indexmap::IndexMap;
use litebind_core::{Choice, Document, NodeShape, WidgetSpec};

use crate::selector;

/// Tag used for radio groups.
pub const RADIO_GROUP_TAG: &str = "radio-group";

/// Handle to a node of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct NodeData {
    tag: String,
    attrs: IndexMap<String, String>,
    text: String,
    value: String,
    checked: bool,
    choices: Vec<Choice>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    removed: bool,
}

impl NodeData {
    fn new(tag: &str, attrs: &[(&str, &str)]) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: attrs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect(),
            ..Self::default()
        }
    }

    fn is_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select" | RADIO_GROUP_TAG)
    }
}

/// Arena-backed document rooted at a `body` element.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<NodeData>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Empty document holding only the root.
    pub fn new() -> Self {
        Self { nodes: vec![NodeData::new("body", &[])] }
    }

    /// Root element.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a generic element with text content.
    pub fn element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> NodeId {
        let mut data = NodeData::new(tag, attrs);
        data.text = text.to_string();
        self.attach(parent, data)
    }

    /// Append an `input` of the given type with a value.
    pub fn input(
        &mut self,
        parent: NodeId,
        input_type: &str,
        attrs: &[(&str, &str)],
        value: &str,
    ) -> NodeId {
        let mut data = NodeData::new("input", attrs);
        data.attrs.insert("type".to_string(), input_type.to_string());
        data.value = value.to_string();
        self.attach(parent, data)
    }

    /// Append a checkbox input.
    pub fn checkbox(&mut self, parent: NodeId, attrs: &[(&str, &str)], checked: bool) -> NodeId {
        let mut data = NodeData::new("input", attrs);
        data.attrs.insert("type".to_string(), "checkbox".to_string());
        data.checked = checked;
        self.attach(parent, data)
    }

    /// Append a dropdown with `(value, label)` options, none selected.
    pub fn select(
        &mut self,
        parent: NodeId,
        attrs: &[(&str, &str)],
        options: &[(&str, &str)],
    ) -> NodeId {
        let mut data = NodeData::new("select", attrs);
        data.choices = to_choices(options);
        self.attach(parent, data)
    }

    /// Append a radio group with `(value, label)` items, none selected.
    pub fn radio_group(
        &mut self,
        parent: NodeId,
        attrs: &[(&str, &str)],
        items: &[(&str, &str)],
    ) -> NodeId {
        let mut data = NodeData::new(RADIO_GROUP_TAG, attrs);
        data.choices = to_choices(items);
        self.attach(parent, data)
    }

    /// Lowercased tag name.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.live(node).map(|data| data.tag.as_str())
    }

    /// Children in order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.live(node).map(|data| data.children.as_slice()).unwrap_or_default()
    }

    /// Whether the node is reachable from the root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root() {
                return true;
            }
            current = self.live(id).and_then(|data| data.parent);
        }
        false
    }

    fn attach(&mut self, parent: NodeId, mut data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent_data) = self.live_mut(parent) {
            parent_data.children.push(id);
            data.parent = Some(parent);
        }
        self.nodes.push(data);
        id
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.live(node).and_then(|data| data.parent) else {
            return;
        };
        if let Some(parent_data) = self.live_mut(parent) {
            parent_data.children.retain(|&child| child != node);
        }
        if let Some(data) = self.live_mut(node) {
            data.parent = None;
        }
    }

    fn live(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0).filter(|data| !data.removed)
    }

    fn live_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(node.0).filter(|data| !data.removed)
    }

    fn descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for &child in self.children(node) {
            out.push(child);
            self.descendants(child, out);
        }
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.live(node) else {
            return;
        };
        if data.is_control() {
            return;
        }
        out.push_str(&data.text);
        for &child in &data.children {
            self.collect_text(child, out);
        }
    }

    fn matches_parsed(&self, node: NodeId, list: &[selector::Compound]) -> bool {
        self.live(node)
            .is_some_and(|data| list.iter().any(|compound| compound.matches(&data.tag, &data.attrs)))
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn query(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(list) = selector::parse(selector) else {
            return Vec::new();
        };

        let mut all = Vec::new();
        self.descendants(scope, &mut all);
        all.retain(|&node| self.matches_parsed(node, &list));
        all
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        selector::parse(selector).is_some_and(|list| self.matches_parsed(node, &list))
    }

    fn shape(&self, node: NodeId) -> NodeShape {
        let Some(data) = self.live(node) else {
            return NodeShape::Element;
        };
        match data.tag.as_str() {
            "input" if data.attrs.get("type").is_some_and(|t| t.eq_ignore_ascii_case("checkbox")) => {
                NodeShape::Checkbox
            },
            "input" | "textarea" => NodeShape::TextField,
            "select" => NodeShape::Select,
            RADIO_GROUP_TAG => NodeShape::RadioGroup,
            _ => NodeShape::Element,
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.live(node)
            .and_then(|data| data.attrs.get("class"))
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.live(node).and_then(|data| data.attrs.get(name).cloned())
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.live_mut(node) {
            data.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(data) = self.live_mut(node) {
            data.attrs.shift_remove(name);
        }
    }

    fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        let children = self.children(node).to_vec();
        for child in children {
            self.detach(child);
        }
        if let Some(data) = self.live_mut(node) {
            data.text = text.to_string();
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.live(node).map(|data| data.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(data) = self.live_mut(node) {
            data.value = value.to_string();
        }
    }

    fn is_checked(&self, node: NodeId) -> bool {
        self.live(node).is_some_and(|data| data.checked)
    }

    fn set_checked(&mut self, node: NodeId, checked: bool) {
        if let Some(data) = self.live_mut(node) {
            data.checked = checked;
        }
    }

    fn choices(&self, node: NodeId) -> Vec<Choice> {
        let Some(data) = self.live(node) else {
            return Vec::new();
        };

        let mut choices = data.choices.clone();
        // A dropdown always shows something: its first option when nothing
        // else is selected.
        if data.tag == "select"
            && !choices.iter().any(|choice| choice.selected)
            && let Some(first) = choices.first_mut()
        {
            first.selected = true;
        }
        choices
    }

    fn select_choice(&mut self, node: NodeId, value: &str) -> bool {
        let Some(data) = self.live_mut(node) else {
            return false;
        };
        if !data.choices.iter().any(|choice| choice.value == value) {
            return false;
        }
        for choice in &mut data.choices {
            choice.selected = choice.value == value;
        }
        true
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.live(node).and_then(|data| data.parent)
    }

    fn create_widget(&mut self, spec: &WidgetSpec) -> NodeId {
        let data = match spec {
            WidgetSpec::Text { value } => {
                let mut data = NodeData::new("input", &[("type", "text")]);
                data.value.clone_from(value);
                data
            },
            WidgetSpec::Checkbox { checked } => {
                let mut data = NodeData::new("input", &[("type", "checkbox")]);
                data.checked = *checked;
                data
            },
            WidgetSpec::Select { choices } => {
                let mut data = NodeData::new("select", &[]);
                data.choices.clone_from(choices);
                data
            },
            WidgetSpec::RadioGroup { choices } => {
                let mut data = NodeData::new(RADIO_GROUP_TAG, &[]);
                data.choices.clone_from(choices);
                data
            },
        };

        let id = NodeId(self.nodes.len());
        self.nodes.push(data);
        id
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.live(parent).is_none() || self.live(child).is_none() {
            return;
        }
        self.detach(child);
        if let Some(parent_data) = self.live_mut(parent) {
            parent_data.children.push(child);
        }
        if let Some(data) = self.live_mut(child) {
            data.parent = Some(parent);
        }
    }

    fn remove(&mut self, node: NodeId) {
        if node == self.root() {
            return;
        }
        self.detach(node);

        let mut doomed = vec![node];
        self.descendants(node, &mut doomed);
        for id in doomed {
            if let Some(data) = self.nodes.get_mut(id.0) {
                data.removed = true;
            }
        }
    }
}

fn to_choices(pairs: &[(&str, &str)]) -> Vec<Choice> {
    pairs.iter().map(|(value, label)| Choice::new(*value, *label)).collect()
}
