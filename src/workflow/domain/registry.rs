//! Static registry of pipeline stages and their transition graph.
//!
//! The registry is the single source of truth for stage metadata and for
//! transition legality: forward edges follow the canonical pipeline order
//! and the two reject edges route failed work back to the responsible
//! role's pending stage. All lookups are total over [`StageId`].

use super::{Role, Stage, StageCategory, StageId};

const BACKLOG: Stage = Stage {
    id: StageId::Backlog,
    name: "Backlog",
    category: StageCategory::Backlog,
    owning_role: Some(Role::ProductManager),
    color: "#7b68ee",
    next_stage: Some(StageId::DevPending),
    reject_target: None,
    description: "Tasks created by PM, waiting to be picked up",
};

const DEV_PENDING: Stage = Stage {
    id: StageId::DevPending,
    name: "Development Pending",
    category: StageCategory::Development,
    owning_role: Some(Role::Developer),
    color: "#49ccf9",
    next_stage: Some(StageId::DevInProgress),
    reject_target: None,
    description: "Waiting for developer to start",
};

const DEV_IN_PROGRESS: Stage = Stage {
    id: StageId::DevInProgress,
    name: "Development In Progress",
    category: StageCategory::Development,
    owning_role: Some(Role::Developer),
    color: "#3498db",
    next_stage: Some(StageId::DevDone),
    reject_target: None,
    description: "Developer is actively working",
};

const DEV_DONE: Stage = Stage {
    id: StageId::DevDone,
    name: "Development Done",
    category: StageCategory::Development,
    owning_role: Some(Role::Developer),
    color: "#2980b9",
    next_stage: Some(StageId::TestPending),
    reject_target: None,
    description: "Development completed, ready for testing",
};

const TEST_PENDING: Stage = Stage {
    id: StageId::TestPending,
    name: "Testing Pending",
    category: StageCategory::Testing,
    owning_role: Some(Role::Tester),
    color: "#ff6b9d",
    next_stage: Some(StageId::TestInProgress),
    reject_target: None,
    description: "Waiting for tester to start",
};

const TEST_IN_PROGRESS: Stage = Stage {
    id: StageId::TestInProgress,
    name: "Testing In Progress",
    category: StageCategory::Testing,
    owning_role: Some(Role::Tester),
    color: "#e91e84",
    next_stage: Some(StageId::TestPassed),
    reject_target: Some(StageId::DevPending),
    description: "Tester is actively testing",
};

const TEST_PASSED: Stage = Stage {
    id: StageId::TestPassed,
    name: "Test Passed",
    category: StageCategory::Testing,
    owning_role: Some(Role::Tester),
    color: "#10b981",
    next_stage: Some(StageId::DeployPending),
    reject_target: None,
    description: "All tests passed",
};

const DEPLOY_PENDING: Stage = Stage {
    id: StageId::DeployPending,
    name: "Deployment Pending",
    category: StageCategory::DevOps,
    owning_role: Some(Role::DevOps),
    color: "#00d4aa",
    next_stage: Some(StageId::Deploying),
    reject_target: None,
    description: "Waiting for deployment",
};

const DEPLOYING: Stage = Stage {
    id: StageId::Deploying,
    name: "Deploying",
    category: StageCategory::DevOps,
    owning_role: Some(Role::DevOps),
    color: "#00b894",
    next_stage: Some(StageId::Deployed),
    reject_target: None,
    description: "Deployment in progress",
};

const DEPLOYED: Stage = Stage {
    id: StageId::Deployed,
    name: "Deployed",
    category: StageCategory::DevOps,
    owning_role: Some(Role::DevOps),
    color: "#009966",
    next_stage: Some(StageId::QaInReview),
    reject_target: None,
    description: "Successfully deployed",
};

const QA_IN_REVIEW: Stage = Stage {
    id: StageId::QaInReview,
    name: "QA In Review",
    category: StageCategory::Qa,
    owning_role: Some(Role::QaReviewer),
    color: "#ffa800",
    next_stage: Some(StageId::QaApproved),
    reject_target: Some(StageId::TestPending),
    description: "QA is reviewing the deployment",
};

const QA_APPROVED: Stage = Stage {
    id: StageId::QaApproved,
    name: "QA Approved",
    category: StageCategory::Qa,
    owning_role: Some(Role::QaReviewer),
    color: "#f39c12",
    next_stage: Some(StageId::Done),
    reject_target: None,
    description: "QA approved, ready to complete",
};

const DONE: Stage = Stage {
    id: StageId::Done,
    name: "Done",
    category: StageCategory::Done,
    owning_role: None,
    color: "#10b981",
    next_stage: None,
    reject_target: None,
    description: "Task completed successfully",
};

const PIPELINE_ORDER: [StageId; 13] = [
    StageId::Backlog,
    StageId::DevPending,
    StageId::DevInProgress,
    StageId::DevDone,
    StageId::TestPending,
    StageId::TestInProgress,
    StageId::TestPassed,
    StageId::DeployPending,
    StageId::Deploying,
    StageId::Deployed,
    StageId::QaInReview,
    StageId::QaApproved,
    StageId::Done,
];

const COMPACT_ORDER: [StageId; 6] = [
    StageId::Backlog,
    StageId::DevInProgress,
    StageId::TestInProgress,
    StageId::Deploying,
    StageId::QaInReview,
    StageId::Done,
];

/// Returns the descriptor for the given stage.
#[must_use]
pub const fn stage(id: StageId) -> &'static Stage {
    match id {
        StageId::Backlog => &BACKLOG,
        StageId::DevPending => &DEV_PENDING,
        StageId::DevInProgress => &DEV_IN_PROGRESS,
        StageId::DevDone => &DEV_DONE,
        StageId::TestPending => &TEST_PENDING,
        StageId::TestInProgress => &TEST_IN_PROGRESS,
        StageId::TestPassed => &TEST_PASSED,
        StageId::DeployPending => &DEPLOY_PENDING,
        StageId::Deploying => &DEPLOYING,
        StageId::Deployed => &DEPLOYED,
        StageId::QaInReview => &QA_IN_REVIEW,
        StageId::QaApproved => &QA_APPROVED,
        StageId::Done => &DONE,
    }
}

/// Returns the descriptor of the stage `advance` moves to, when one exists.
#[must_use]
pub const fn next_stage(id: StageId) -> Option<&'static Stage> {
    match stage(id).next_stage {
        Some(next) => Some(stage(next)),
        None => None,
    }
}

/// Returns the descriptor of the stage `reject` moves to, when one exists.
#[must_use]
pub const fn reject_target(id: StageId) -> Option<&'static Stage> {
    match stage(id).reject_target {
        Some(target) => Some(stage(target)),
        None => None,
    }
}

/// Returns the canonical pipeline order for sequential board display.
#[must_use]
pub const fn pipeline() -> &'static [StageId; 13] {
    &PIPELINE_ORDER
}

/// Returns the condensed stage sequence used by the compact board view.
#[must_use]
pub const fn compact_pipeline() -> &'static [StageId; 6] {
    &COMPACT_ORDER
}

/// Returns the ordered stage ids belonging to a display category.
#[must_use]
pub const fn stages_in(category: StageCategory) -> &'static [StageId] {
    match category {
        StageCategory::Backlog => &[StageId::Backlog],
        StageCategory::Development => &[
            StageId::DevPending,
            StageId::DevInProgress,
            StageId::DevDone,
        ],
        StageCategory::Testing => &[
            StageId::TestPending,
            StageId::TestInProgress,
            StageId::TestPassed,
        ],
        StageCategory::DevOps => &[
            StageId::DeployPending,
            StageId::Deploying,
            StageId::Deployed,
        ],
        StageCategory::Qa => &[StageId::QaInReview, StageId::QaApproved],
        StageCategory::Done => &[StageId::Done],
    }
}

/// Returns `true` when the given role owns the given stage.
#[must_use]
pub fn role_owns_stage(role: Role, id: StageId) -> bool {
    stage(id).owning_role == Some(role)
}
