//! Board projections grouping tasks by stage.

use crate::workflow::domain::{Stage, StageCategory, StageId, Task, registry};

/// One board column: a stage descriptor and the tasks currently in it.
#[derive(Debug, Clone, PartialEq)]
pub struct StageColumn<'t> {
    /// Stage descriptor backing the column.
    pub stage: &'static Stage,
    /// Tasks whose current stage matches, in collection order.
    pub tasks: Vec<&'t Task>,
}

/// Returns one column per pipeline stage, in pipeline order.
#[must_use]
pub fn board_columns(tasks: &[Task]) -> Vec<StageColumn<'_>> {
    columns_for(registry::pipeline(), tasks)
}

/// Returns the condensed column set for narrow layouts.
///
/// Tasks sitting in a stage outside the compact subset do not appear.
#[must_use]
pub fn compact_columns(tasks: &[Task]) -> Vec<StageColumn<'_>> {
    columns_for(registry::compact_pipeline(), tasks)
}

/// Returns the columns for a single category's stages.
#[must_use]
pub fn category_columns(category: StageCategory, tasks: &[Task]) -> Vec<StageColumn<'_>> {
    columns_for(registry::stages_in(category), tasks)
}

/// Counts the tasks currently in any of the category's stages.
#[must_use]
pub fn category_task_count(tasks: &[Task], category: StageCategory) -> usize {
    tasks
        .iter()
        .filter(|task| registry::stage(task.current_stage()).category == category)
        .count()
}

fn columns_for<'t>(order: &[StageId], tasks: &'t [Task]) -> Vec<StageColumn<'t>> {
    order
        .iter()
        .map(|&stage_id| StageColumn {
            stage: registry::stage(stage_id),
            tasks: tasks
                .iter()
                .filter(|task| task.current_stage() == stage_id)
                .collect(),
        })
        .collect()
}
