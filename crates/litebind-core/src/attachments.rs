//! Explicit element → binder registry.
//!
//! The application owns this map. Attaching a second binder to the same
//! element is an error; teardown is an explicit [`Attachments::detach`].

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
    hash::Hash,
};

use crate::{binder::Binder, error::AttachError};

/// Binders keyed by the element they are attached to.
pub struct Attachments<N> {
    binders: HashMap<N, Binder<N>>,
}

impl<N> Default for Attachments<N> {
    fn default() -> Self {
        Self { binders: HashMap::new() }
    }
}

impl<N: Copy + Eq + Hash + fmt::Debug> Attachments<N> {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a binder to its scope element.
    ///
    /// # Errors
    ///
    /// [`AttachError::AlreadyAttached`] if the element already owns a binder.
    pub fn attach(&mut self, binder: Binder<N>) -> Result<&mut Binder<N>, AttachError> {
        match self.binders.entry(binder.scope()) {
            Entry::Occupied(_) => Err(AttachError::AlreadyAttached),
            Entry::Vacant(slot) => Ok(slot.insert(binder)),
        }
    }

    /// Binder attached to `element`.
    pub fn get(&self, element: N) -> Option<&Binder<N>> {
        self.binders.get(&element)
    }

    /// Mutable binder attached to `element`.
    pub fn get_mut(&mut self, element: N) -> Option<&mut Binder<N>> {
        self.binders.get_mut(&element)
    }

    /// Remove and return the binder attached to `element`.
    pub fn detach(&mut self, element: N) -> Option<Binder<N>> {
        self.binders.remove(&element)
    }

    /// Whether `element` owns a binder.
    pub fn contains(&self, element: N) -> bool {
        self.binders.contains_key(&element)
    }

    /// Number of attached binders.
    pub fn len(&self) -> usize {
        self.binders.len()
    }

    /// Whether no binder is attached.
    pub fn is_empty(&self) -> bool {
        self.binders.is_empty()
    }
}

impl<N: fmt::Debug> fmt::Debug for Attachments<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachments").field("elements", &self.binders.keys()).finish()
    }
}
