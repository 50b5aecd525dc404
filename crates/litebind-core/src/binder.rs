//! Binding orchestration.
//!
//! The [`Binder`] ties the pieces together: it owns the configuration, the
//! view registry and the source, turns `get`/`set` into requests, applies
//! responses through the transducer, and exposes the mode transitions.
//!
//! # Request lifecycle
//!
//! ```text
//! get()/set()/resolve_sources()
//!        │  BinderAction::Send(Request { id, .. })
//!        ▼
//!   runtime performs the request
//!        │
//!        ├── success ──> handle_response(id, body) ──> apply / hook
//!        └── failure ──> handle_failure(id)        ──> nothing
//! ```
//!
//! Responses are handled in completion order. With
//! [`StalePolicy::Discard`] a fetch response is dropped once a later-issued
//! fetch has been applied; [`Binder::cancel`] forgets a request so its
//! response is ignored.

use std::{collections::BTreeMap, fmt, hash::Hash};

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::{BinderConfig, Method, StalePolicy},
    document::Document,
    error::BinderError,
    hooks::{BinderHooks, NoopHooks},
    mode::ModeTransition,
    payload::{KeyedPayload, parse_payload},
    registry::ViewRegistry,
    request::{BinderAction, Request, RequestBody, RequestId, RequestKind, fetch_target},
    source::SourceResolver,
    transducer::{ValueTransducer, encode_for_method},
    view::{Mode, View},
};

/// Sub-selection of registered views for mode changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target<N> {
    /// Every registered view
    All,
    /// Views whose node matches a selector
    Selector(String),
    /// Views carrying one of these keys
    Keys(Vec<String>),
    /// Views backed by one of these nodes
    Nodes(Vec<N>),
}

/// Binds one scope element's views to a remote keyed data model.
pub struct Binder<N> {
    config: BinderConfig,
    scope: N,
    initial_views: Vec<N>,
    registry: ViewRegistry<N>,
    source: SourceResolver,
    hooks: Box<dyn BinderHooks>,
    next_id: u64,
    in_flight: BTreeMap<RequestId, RequestKind>,
    newest_applied_fetch: Option<RequestId>,
}

impl<N: Copy + Eq + Hash + fmt::Debug> Binder<N> {
    /// Create a binder for the views under `scope`.
    ///
    /// Nothing happens until [`Binder::start`].
    pub fn new(config: BinderConfig, scope: N) -> Self {
        let source = SourceResolver::new(config.source.clone());
        Self {
            config,
            scope,
            initial_views: Vec::new(),
            registry: ViewRegistry::new(),
            source,
            hooks: Box::new(NoopHooks),
            next_id: 1,
            in_flight: BTreeMap::new(),
            newest_applied_fetch: None,
        }
    }

    /// Explicit initial views, used when no view selector is configured.
    #[must_use]
    pub fn with_views(mut self, views: impl IntoIterator<Item = N>) -> Self {
        self.initial_views = views.into_iter().collect();
        self
    }

    /// Observer notified of completed operations.
    #[must_use]
    pub fn with_hooks(mut self, hooks: impl BinderHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Configuration, including any endpoint overrides applied so far.
    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    /// Element the binder is attached to.
    pub fn scope(&self) -> N {
        self.scope
    }

    /// Currently bound views.
    pub fn registry(&self) -> &ViewRegistry<N> {
        &self.registry
    }

    /// Source resolution state.
    pub fn source(&self) -> &SourceResolver {
        &self.source
    }

    /// Requests issued and not yet completed, failed or cancelled.
    pub fn in_flight(&self) -> impl Iterator<Item = (RequestId, RequestKind)> + '_ {
        self.in_flight.iter().map(|(id, kind)| (*id, *kind))
    }

    /// Collect the views, start source resolution, and issue the initial
    /// fetch when `getOnInit` is set and at least one view is bound.
    ///
    /// A configured view selector takes precedence over explicit views.
    /// The refresh hook is not fired here.
    pub fn start<D: Document<Node = N>>(&mut self, doc: &D) -> Vec<BinderAction> {
        self.registry = if self.config.view_selector.is_empty() {
            ViewRegistry::from_nodes(doc, self.initial_views.iter().copied(), &self.config.key)
        } else {
            self.scan(doc)
        };

        let mut actions = self.resolve_sources();
        if self.config.get_on_init && !self.registry.is_empty() {
            actions.extend(self.get(doc, None));
        }
        actions
    }

    /// Re-collect the views from the scope.
    ///
    /// Only effective with a view selector; the refresh hook fires either
    /// way.
    pub fn refresh<D: Document<Node = N>>(&mut self, doc: &D) {
        if !self.config.view_selector.is_empty() {
            self.registry = self.scan(doc);
        }
        self.hooks.on_refresh();
    }

    /// Request the source if it is still unresolved.
    ///
    /// Every call while unresolved issues a new request.
    pub fn resolve_sources(&mut self) -> Vec<BinderAction> {
        let Some(url) = self.source.pending_url().map(str::to_string) else {
            return Vec::new();
        };

        let request = self.issue(RequestKind::Source, Method::Get, url, RequestBody::Empty);
        vec![BinderAction::Send(request)]
    }

    /// Fetch the keyed payload and apply it when it arrives.
    ///
    /// `endpoint` permanently replaces the configured fetch endpoint.
    pub fn get<D: Document<Node = N>>(
        &mut self,
        doc: &D,
        endpoint: Option<&str>,
    ) -> Vec<BinderAction> {
        if let Some(endpoint) = endpoint {
            self.config.get_url = endpoint.to_string();
        }
        if self.config.auto_refresh {
            self.refresh(doc);
        }

        let mut actions = self.resolve_sources();

        let (url, body) =
            fetch_target(&self.config.get_url, &self.config.arguments, self.config.use_uri_segments);
        let request = self.issue(RequestKind::Fetch, self.config.method, url, body);
        actions.push(BinderAction::Send(request));
        actions
    }

    /// Submit the current values of the views.
    ///
    /// With `setInputsOnly` only views in edit mode are read. Views with an
    /// empty key are skipped; when two views share a key the later one wins.
    /// `endpoint` permanently replaces the configured submit endpoint.
    pub fn set<D: Document<Node = N>>(
        &mut self,
        doc: &D,
        endpoint: Option<&str>,
    ) -> Vec<BinderAction> {
        if let Some(endpoint) = endpoint {
            self.config.set_url = endpoint.to_string();
        }
        if self.config.auto_refresh {
            self.refresh(doc);
        }

        let payload = self.collect_payload(doc);
        let request = self.issue(
            RequestKind::Submit,
            self.config.method,
            self.config.set_url.clone(),
            RequestBody::Payload(payload),
        );
        vec![BinderAction::Send(request)]
    }

    /// Payload `set` would submit right now.
    pub fn collect_payload<D: Document<Node = N>>(&self, doc: &D) -> KeyedPayload {
        let transducer = self.transducer();
        self.registry
            .iter()
            .filter(|view| !self.config.set_inputs_only || view.mode() == Mode::Edit)
            .filter(|view| !view.key().is_empty())
            .map(|view| {
                let value = encode_for_method(transducer.extract(doc, view), self.config.method);
                (view.key().to_string(), value)
            })
            .collect()
    }

    /// Turn the targeted display views into editable widgets.
    ///
    /// Also retries source resolution, whose request is returned. Views
    /// whose key has no source entry yet become text fields or checkboxes.
    pub fn set_edit_mode<D: Document<Node = N>>(
        &mut self,
        doc: &mut D,
        target: &Target<N>,
    ) -> Vec<BinderAction> {
        let targeted = self.targeted(doc, target, Mode::Display);
        let actions = self.resolve_sources();

        let transition = ModeTransition::new(
            &self.source,
            &self.config.key,
            &self.config.true_display,
            &self.config.false_display,
        );
        for view in targeted {
            if let Some(edit) = transition.to_edit(doc, &view) {
                self.registry.replace(view.node(), edit);
            }
        }
        actions
    }

    /// Turn the targeted editable views back into display elements.
    pub fn set_display_mode<D: Document<Node = N>>(&mut self, doc: &mut D, target: &Target<N>) {
        let targeted = self.targeted(doc, target, Mode::Edit);

        let transition = ModeTransition::new(
            &self.source,
            &self.config.key,
            &self.config.true_display,
            &self.config.false_display,
        );
        for view in targeted {
            if let Some(display) = transition.to_display(doc, &view) {
                self.registry.replace(view.node(), display);
            }
        }
    }

    /// Report a successful response.
    ///
    /// # Errors
    ///
    /// [`BinderError::UnknownRequest`] if `id` is not in flight. Responses
    /// to cancelled requests land here and are safe to ignore.
    pub fn handle_response<D: Document<Node = N>>(
        &mut self,
        doc: &mut D,
        id: RequestId,
        response: &Value,
    ) -> Result<(), BinderError> {
        let kind = self.in_flight.remove(&id).ok_or(BinderError::UnknownRequest(id))?;

        match kind {
            RequestKind::Fetch => self.complete_fetch(doc, id, response),
            RequestKind::Submit => self.hooks.on_set(response),
            RequestKind::Source => {
                if !self.source.accept(response) {
                    warn!(%id, "unusable source response, keeping previous source");
                }
            },
        }
        Ok(())
    }

    /// Report a failed request. Nothing is applied and no hook fires.
    ///
    /// # Errors
    ///
    /// [`BinderError::UnknownRequest`] if `id` is not in flight.
    pub fn handle_failure(&mut self, id: RequestId, reason: &str) -> Result<(), BinderError> {
        let kind = self.in_flight.remove(&id).ok_or(BinderError::UnknownRequest(id))?;
        warn!(%id, ?kind, reason, "request failed");
        Ok(())
    }

    /// Forget an in-flight request; its eventual outcome is ignored.
    ///
    /// Returns whether the request was in flight.
    pub fn cancel(&mut self, id: RequestId) -> bool {
        let cancelled = self.in_flight.remove(&id).is_some();
        if cancelled {
            debug!(%id, "request cancelled");
        }
        cancelled
    }

    fn complete_fetch<D: Document<Node = N>>(&mut self, doc: &mut D, id: RequestId, response: &Value) {
        if self.config.stale_responses == StalePolicy::Discard
            && self.newest_applied_fetch.is_some_and(|newest| newest > id)
        {
            debug!(%id, "discarding stale fetch response");
            return;
        }

        if let Some(payload) = parse_payload(response) {
            let transducer = ValueTransducer::new(
                &self.source,
                &self.config.true_display,
                &self.config.false_display,
            );
            for (key, raw) in &payload {
                let mut matched = false;
                for view in self.registry.with_key(key) {
                    matched = true;
                    transducer.apply(doc, view, raw);
                }
                if !matched {
                    debug!(key = %key, "no view for payload key");
                }
            }
        }

        self.newest_applied_fetch = self.newest_applied_fetch.max(Some(id));
        self.hooks.on_get(response);
    }

    fn scan<D: Document<Node = N>>(&self, doc: &D) -> ViewRegistry<N> {
        ViewRegistry::scan(doc, self.scope, &self.config.view_selector, &self.config.key)
    }

    fn transducer(&self) -> ValueTransducer<'_> {
        ValueTransducer::new(&self.source, &self.config.true_display, &self.config.false_display)
    }

    fn targeted<D: Document<Node = N>>(
        &self,
        doc: &D,
        target: &Target<N>,
        mode: Mode,
    ) -> Vec<View<N>> {
        self.registry
            .iter()
            .filter(|view| view.mode() == mode)
            .filter(|view| match target {
                Target::All => true,
                Target::Selector(selector) => doc.matches(view.node(), selector),
                Target::Keys(keys) => keys.iter().any(|key| key == view.key()),
                Target::Nodes(nodes) => nodes.contains(&view.node()),
            })
            .cloned()
            .collect()
    }

    fn issue(&mut self, kind: RequestKind, method: Method, url: String, body: RequestBody) -> Request {
        let id = RequestId::new(self.next_id);
        self.next_id += 1;
        self.in_flight.insert(id, kind);
        debug!(%id, ?kind, %method, url = %url, "issuing request");
        Request { id, kind, method, url, body }
    }
}

impl<N: fmt::Debug> fmt::Debug for Binder<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("scope", &self.scope)
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("source", &self.source)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}
