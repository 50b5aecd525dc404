//! The set of currently bound views.
//!
//! Views are rebuilt wholesale by re-querying the binder's scope, or replaced
//! one at a time by mode transitions. Registration order is kept; it decides
//! which view wins when two share a key in a submitted payload.

use std::{collections::HashSet, fmt, hash::Hash};

use tracing::debug;

use crate::{
    document::Document,
    view::{View, WidgetKind},
};

/// Append the key-attribute filter to every clause of a selector.
///
/// `"a,b"` with key `name` becomes `"a[name],b[name]"`. Clauses are trimmed
/// and empty clauses dropped.
pub fn expand_selector(selector: &str, key: &str) -> String {
    selector
        .split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(|clause| format!("{clause}[{key}]"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Ordered collection of bound views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRegistry<N> {
    views: Vec<View<N>>,
}

impl<N> Default for ViewRegistry<N> {
    fn default() -> Self {
        Self { views: Vec::new() }
    }
}

impl<N: Copy + Eq + Hash + fmt::Debug> ViewRegistry<N> {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the nodes under `scope` matching `selector`
    /// with the key filter appended.
    ///
    /// An empty key attribute name or a selector matching nothing yields an
    /// empty registry.
    pub fn scan<D: Document<Node = N>>(doc: &D, scope: N, selector: &str, key_attr: &str) -> Self {
        if key_attr.is_empty() {
            debug!("empty key attribute, no views registered");
            return Self::new();
        }

        let expanded = expand_selector(selector, key_attr);
        let nodes = doc.query(scope, &expanded);
        debug!(selector = %expanded, matched = nodes.len(), "scanned views");
        Self::from_nodes(doc, nodes, key_attr)
    }

    /// Build a registry from an explicit node list.
    pub fn from_nodes<D: Document<Node = N>>(
        doc: &D,
        nodes: impl IntoIterator<Item = N>,
        key_attr: &str,
    ) -> Self {
        let mut registry = Self::new();
        for node in nodes {
            registry.register(doc, node, key_attr);
        }
        registry
    }

    /// Register a node, classifying it once.
    ///
    /// Nodes without a non-empty key attribute and nodes already registered
    /// are skipped. Returns whether a view was added.
    pub fn register<D: Document<Node = N>>(&mut self, doc: &D, node: N, key_attr: &str) -> bool {
        let Some(key) = doc.attribute(node, key_attr).filter(|key| !key.is_empty()) else {
            return false;
        };
        if self.view(node).is_some() {
            return false;
        }
        if self.with_key(&key).next().is_some() {
            debug!(key = %key, "duplicate key registered");
        }

        let kind = WidgetKind::classify(doc, node);
        self.views.push(View::new(node, key, kind));
        true
    }

    /// Replace the view backed by `old` with `new`, keeping its position.
    ///
    /// Any other view already backed by `new`'s node is dropped so a node is
    /// never registered twice. If `old` is not registered, `new` is appended.
    pub fn replace(&mut self, old: N, new: View<N>) {
        let new_node = new.node();
        if new_node != old {
            self.views.retain(|view| view.node() != new_node);
        }

        match self.views.iter_mut().find(|view| view.node() == old) {
            Some(slot) => *slot = new,
            None => self.views.push(new),
        }
    }

    /// Number of views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether no view is registered.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Views in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &View<N>> {
        self.views.iter()
    }

    /// All views carrying `key`, in registration order.
    pub fn with_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a View<N>> + 'a {
        self.views.iter().filter(move |view| view.key() == key)
    }

    /// View backed by `node`.
    pub fn view(&self, node: N) -> Option<&View<N>> {
        self.views.iter().find(|view| view.node() == node)
    }

    /// Keys carried by more than one view.
    pub fn duplicate_keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for view in &self.views {
            if !seen.insert(view.key()) && !duplicates.contains(&view.key()) {
                duplicates.push(view.key());
            }
        }
        duplicates
    }
}
