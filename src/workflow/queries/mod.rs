//! Read-side projections: board grouping, filtering, and progress rollups.
//!
//! Everything here is a pure function over task slices; results are
//! recomputed per call and never cached.

mod board;
mod filter;
mod stats;

pub use board::{
    StageColumn, board_columns, category_columns, category_task_count, compact_columns,
};
pub use filter::{TaskFilter, filter_tasks};
pub use stats::{
    AssigneeStats, ProjectStats, TeamStats, WorkflowSummary, per_assignee_stats, pipeline_progress,
    project_stats, summarize, team_stats,
};
