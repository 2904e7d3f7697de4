//! Adapter implementations of the workflow ports.

pub mod json_store;
pub mod memory;

pub use json_store::JsonFileTaskRepository;
pub use memory::InMemoryTaskRepository;
