//! Litebind binding engine
//!
//! Binds labeled presentation elements to a remote, key-addressed data model.
//! A fetch writes every value of a key→value payload into the element carrying
//! that key, transduced according to the element's widget kind. A submit reads
//! the editable elements back into a key→value payload.
//!
//! # Architecture
//!
//! The engine is a Sans-IO state machine. It never performs network calls and
//! never walks a real presentation tree directly:
//!
//! - the presentation tree is reached through the [`Document`] trait
//! - every network effect is returned as a declarative [`BinderAction`]
//! - responses and failures are fed back by the caller through
//!   [`Binder::handle_response`] and [`Binder::handle_failure`]
//!
//! The same code therefore runs against a browser DOM bridge, a terminal
//! form, or the deterministic in-memory document used in tests.
//!
//! # Components
//!
//! - [`transducer`]: per-widget-kind value conversion (`apply` / `extract`)
//! - [`source`]: enumerable choice sets and their resolution state
//! - [`registry`]: the set of bound views and selector expansion
//! - [`mode`]: display ↔ edit transitions
//! - [`binder`]: orchestration of get, set, refresh and mode changes
//! - [`attachments`]: explicit element → binder registry

pub mod attachments;
pub mod binder;
pub mod config;
pub mod document;
pub mod error;
pub mod hooks;
pub mod mode;
pub mod payload;
pub mod registry;
pub mod request;
pub mod source;
pub mod transducer;
pub mod view;

pub use attachments::Attachments;
pub use binder::{Binder, Target};
pub use config::{Argument, BinderConfig, Method, SourceSpec, StalePolicy};
pub use document::{Choice, Document, NodeShape, WidgetSpec};
pub use error::{AttachError, BinderError, ConfigError};
pub use hooks::{BinderHooks, NoopHooks};
pub use mode::ModeTransition;
pub use payload::{KeyedPayload, Scalar};
pub use registry::{ViewRegistry, expand_selector};
pub use request::{BinderAction, Request, RequestBody, RequestId, RequestKind};
pub use source::{Choices, SourceMap, SourceResolver, SourceState};
pub use transducer::ValueTransducer;
pub use view::{Mode, View, WidgetKind};
