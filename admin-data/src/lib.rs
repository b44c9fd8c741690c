//! Headless data layer for the recipes and care admin panels.
//!
//! The crate separates three concerns the panels used to tangle together:
//!
//! - **domain** — entity identity and stamps, the composable list query
//!   (free-text search, discrete filters, ordering), the shallow-merge
//!   patch, and the uniform `{ ok, data }` envelope;
//! - **outbound** — interchangeable adapters behind the domain's ports: a
//!   mock-mode repository over an in-memory or JSON-file store, and a
//!   real-mode REST client;
//! - **controller** — the headless page state machines (debounced list
//!   controller with a stale-response guard, drawer form, confirm dialog)
//!   that a front end renders from.
//!
//! [`apps`] instantiates the lot for each panel's entity catalogue, and
//! [`service::ServiceFactory`] picks mock or remote adapters once, from
//! [`config::ServiceConfig`].

pub mod apps;
pub mod config;
pub mod controller;
pub mod domain;
pub mod outbound;
pub mod service;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{ServiceConfig, ServiceMode};
pub use domain::{
    EntityId, EntityKind, Envelope, ListQuery, Patch, ServiceError, SortOrder, Stamped, StoreError,
};
pub use service::ServiceFactory;
