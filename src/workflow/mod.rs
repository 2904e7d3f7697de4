//! Workflow pipeline management for Stagehand.
//!
//! This module implements the staged workflow board: a fixed pipeline of
//! role-owned stages through which every task travels, validated advance
//! and reject transitions with a full audit trail, role-locked assignee
//! records, and the board, filter, and statistics read models layered on
//! top of the task collection. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Derived read models in [`queries`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod queries;
pub mod services;

#[cfg(test)]
mod tests;
