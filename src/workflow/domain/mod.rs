//! Domain model for the workflow pipeline.
//!
//! The domain models the fixed stage pipeline, role-locked task records,
//! validated advance/reject transitions, and the append-only audit trail,
//! while keeping all infrastructure concerns outside the domain boundary.

mod details;
mod error;
mod history;
mod ids;
mod project;
pub mod registry;
mod role;
mod stage;
mod task;
mod user;

pub use details::{Label, Priority, Subtask, TaskDetails};
pub use error::{
    ParsePriorityError, ParseRoleError, ParseStageIdError, TransitionKind, WorkflowError,
};
pub use history::{Rejection, StageVisit, TransitionAction};
pub use ids::{ProjectId, TaskId, UserId};
pub use project::Project;
pub use role::{AssigneeDraft, Role, RoleAssignments};
pub use stage::{Stage, StageCategory, StageId};
pub use task::{NewTaskParams, Task};
pub use user::User;
