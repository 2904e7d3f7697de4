//! Port contracts for the workflow pipeline.
//!
//! Ports define infrastructure-agnostic interfaces used by workflow
//! services.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
