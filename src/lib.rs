//! Stagehand: role-based workflow board engine.
//!
//! This crate provides the state-machine core of a staged Kanban workflow:
//! a fixed pipeline of role-owned stages, validated advance and reject
//! transitions, an append-only stage history per task, and the derived
//! board, filter, and statistics views computed from a task collection.
//!
//! # Architecture
//!
//! Stagehand follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, JSON file)
//! - **Queries**: Pure read models derived from the task collection
//!
//! # Modules
//!
//! - [`workflow`]: Stage registry, task lifecycle, transitions, and views

pub mod workflow;
