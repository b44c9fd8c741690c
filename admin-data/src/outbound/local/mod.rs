//! Mock-mode adapters: local key-value stores and the generic repository.

mod collection;
mod json_file;
mod memory;

pub use collection::Collection;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
