//! Generic runtime executing binder actions through a [`Driver`].
//!
//! Requests are awaited one at a time, in the order the binder emitted
//! them, and each outcome is fed back before the next request is sent.

use litebind_core::{Binder, BinderAction, Document, Target};
use tracing::warn;

use crate::{Driver, RuntimeError};

/// Owns a document, a driver and the binder bound to that document.
pub struct Runtime<Doc: Document, Drv> {
    document: Doc,
    driver: Drv,
    binder: Binder<Doc::Node>,
}

impl<Doc: Document, Drv: Driver> Runtime<Doc, Drv> {
    /// Assemble a runtime. Call [`Runtime::start`] to collect views and run
    /// the initial fetch.
    pub fn new(document: Doc, driver: Drv, binder: Binder<Doc::Node>) -> Self {
        Self { document, driver, binder }
    }

    /// Presentation tree.
    pub fn document(&self) -> &Doc {
        &self.document
    }

    /// Mutable presentation tree, for simulating user edits.
    pub fn document_mut(&mut self) -> &mut Doc {
        &mut self.document
    }

    /// Transport driver.
    pub fn driver(&self) -> &Drv {
        &self.driver
    }

    /// Mutable transport driver.
    pub fn driver_mut(&mut self) -> &mut Drv {
        &mut self.driver
    }

    /// Binder state.
    pub fn binder(&self) -> &Binder<Doc::Node> {
        &self.binder
    }

    /// Consume the runtime.
    pub fn into_parts(self) -> (Doc, Drv, Binder<Doc::Node>) {
        (self.document, self.driver, self.binder)
    }

    /// Collect views, resolve the source and run the initial fetch.
    pub async fn start(&mut self) -> Result<(), RuntimeError> {
        let actions = self.binder.start(&self.document);
        self.execute(actions).await
    }

    /// Fetch and apply the keyed payload.
    pub async fn get(&mut self, endpoint: Option<&str>) -> Result<(), RuntimeError> {
        let actions = self.binder.get(&self.document, endpoint);
        self.execute(actions).await
    }

    /// Submit the current view values.
    pub async fn set(&mut self, endpoint: Option<&str>) -> Result<(), RuntimeError> {
        let actions = self.binder.set(&self.document, endpoint);
        self.execute(actions).await
    }

    /// Re-collect the views.
    pub fn refresh(&mut self) {
        self.binder.refresh(&self.document);
    }

    /// Try to resolve the source; returns whether it is resolved afterwards.
    pub async fn resolve_sources(&mut self) -> Result<bool, RuntimeError> {
        let actions = self.binder.resolve_sources();
        self.execute(actions).await?;
        Ok(self.binder.source().is_resolved())
    }

    /// Switch views to edit mode once the source had a chance to resolve,
    /// so choice widgets are not missed because of a pending fetch.
    ///
    /// Exactly one source attempt is made per call. The retry the binder
    /// emits for a still-unresolved source is cancelled, not sent.
    pub async fn set_edit_mode(&mut self, target: &Target<Doc::Node>) -> Result<(), RuntimeError> {
        if !self.resolve_sources().await? {
            warn!("source unresolved, choice fields become text fields");
        }
        for BinderAction::Send(request) in self.binder.set_edit_mode(&mut self.document, target) {
            self.binder.cancel(request.id);
        }
        Ok(())
    }

    /// Switch views back to display mode.
    pub fn set_display_mode(&mut self, target: &Target<Doc::Node>) {
        self.binder.set_display_mode(&mut self.document, target);
    }

    async fn execute(&mut self, actions: Vec<BinderAction>) -> Result<(), RuntimeError> {
        for action in actions {
            match action {
                BinderAction::Send(request) => match self.driver.send(&request).await {
                    Ok(response) => {
                        self.binder.handle_response(&mut self.document, request.id, &response)?;
                    },
                    Err(error) => {
                        self.binder.handle_failure(request.id, &error.to_string())?;
                    },
                },
            }
        }
        Ok(())
    }
}
