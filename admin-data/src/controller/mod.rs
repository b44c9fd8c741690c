//! Headless view controllers: list state, drawer forms, confirmations.
//!
//! Controllers hold no rendering concerns; a front end reads snapshots and
//! forwards user intent. They depend only on the [`crate::domain`] ports,
//! so every entity and both service modes share the same behaviour.

mod confirm;
mod debounce;
mod drawer;
mod list_page;

pub use confirm::ConfirmDialog;
pub use debounce::Debouncer;
pub use drawer::{Draft, DrawerForm, DrawerSubmission};
pub use list_page::{ListController, ListSnapshot, PaginationMode};
