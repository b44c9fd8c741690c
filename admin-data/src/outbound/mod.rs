//! Driven adapters behind the domain ports.

pub mod http;
pub mod local;
