//! Recording hooks.

use std::{cell::RefCell, rc::Rc};

use litebind_core::BinderHooks;
use serde_json::Value;

/// Notifications received so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HookLog {
    /// Responses passed to `on_get`
    pub gets: Vec<Value>,
    /// Responses passed to `on_set`
    pub sets: Vec<Value>,
    /// Number of `on_refresh` calls
    pub refreshes: usize,
}

/// Hooks appending every notification to a shared [`HookLog`].
///
/// Clones share the log, so a test keeps one clone and hands the other to
/// the binder.
#[derive(Debug, Clone, Default)]
pub struct RecordingHooks {
    log: Rc<RefCell<HookLog>>,
}

impl RecordingHooks {
    /// Hooks with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the log.
    pub fn log(&self) -> HookLog {
        self.log.borrow().clone()
    }
}

impl BinderHooks for RecordingHooks {
    fn on_get(&mut self, response: &Value) {
        self.log.borrow_mut().gets.push(response.clone());
    }

    fn on_set(&mut self, response: &Value) {
        self.log.borrow_mut().sets.push(response.clone());
    }

    fn on_refresh(&mut self) {
        self.log.borrow_mut().refreshes += 1;
    }
}
