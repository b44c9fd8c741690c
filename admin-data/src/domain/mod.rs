//! Domain types shared across adapters, services, and controllers.

mod entity;
mod envelope;
mod error;
mod patch;
pub mod ports;
mod query;

pub use entity::{EntityId, EntityKind, Stamped};
pub use envelope::Envelope;
pub use error::{ServiceError, StoreError};
pub use patch::Patch;
pub(crate) use patch::apply_patch;
pub use query::{ListQuery, SortOrder};
