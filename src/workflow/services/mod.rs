//! Application services bridging domain logic with persistence ports.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, WorkflowService, WorkflowServiceError, WorkflowServiceResult,
};
