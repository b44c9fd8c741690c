//! Per-panel entity catalogues and service bundles.
//!
//! Each app module declares its entities (serde structs with
//! [`crate::domain::EntityKind`] bindings), deterministic seed data, and a
//! bundle struct holding one [`crate::domain::ports::EntityService`] per
//! entity, plus the cross-collection operations that keep referential
//! integrity on delete.

pub mod care;
pub mod recipes;

pub use self::care::CareAdmin;
pub use self::recipes::RecipesAdmin;
