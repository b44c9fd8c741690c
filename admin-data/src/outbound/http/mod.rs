//! Real-mode adapters: REST transport and typed remote collections.

mod client;
mod remote;

pub use client::RestBackend;
pub use remote::RemoteCollection;
