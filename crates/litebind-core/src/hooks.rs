//! Typed observer for binder operations.
//!
//! Each hook is delivered synchronously, exactly once, when the owning
//! operation's outcome is known:
//!
//! - `on_get` after a fetch response was applied, with the raw response
//!   (including `null`)
//! - `on_set` after a submit response arrived, with the raw response
//! - `on_refresh` after every refresh
//!
//! Transport failures deliver nothing.

use serde_json::Value;

/// Observer of binder operations. Every method defaults to a no-op.
pub trait BinderHooks {
    /// A fetch completed and its payload was applied.
    fn on_get(&mut self, response: &Value) {
        let _ = response;
    }

    /// A submit completed.
    fn on_set(&mut self, response: &Value) {
        let _ = response;
    }

    /// The view registry was refreshed.
    fn on_refresh(&mut self) {}
}

/// Hooks that ignore every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl BinderHooks for NoopHooks {}
