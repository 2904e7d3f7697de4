//! Pipeline stage identifiers, categories, and static stage descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ParseStageIdError, Role};

/// Identifier of a pipeline stage.
///
/// The pipeline is closed: every stage a task can occupy is a variant here,
/// so stored or user-supplied stage ids are validated once at the parse
/// boundary and never looked up by raw string afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    /// Tasks created by the product manager, not yet picked up.
    Backlog,
    /// Waiting for a developer to start.
    DevPending,
    /// Development underway.
    DevInProgress,
    /// Development finished, ready for testing.
    DevDone,
    /// Waiting for a tester to start.
    TestPending,
    /// Testing underway.
    TestInProgress,
    /// All tests passed.
    TestPassed,
    /// Waiting for deployment.
    DeployPending,
    /// Deployment underway.
    Deploying,
    /// Deployed successfully.
    Deployed,
    /// QA review underway.
    QaInReview,
    /// QA approved, ready to complete.
    QaApproved,
    /// Terminal stage; the task is complete.
    Done,
}

impl StageId {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::DevPending => "dev_pending",
            Self::DevInProgress => "dev_in_progress",
            Self::DevDone => "dev_done",
            Self::TestPending => "test_pending",
            Self::TestInProgress => "test_in_progress",
            Self::TestPassed => "test_passed",
            Self::DeployPending => "deploy_pending",
            Self::Deploying => "deploying",
            Self::Deployed => "deployed",
            Self::QaInReview => "qa_in_review",
            Self::QaApproved => "qa_approved",
            Self::Done => "done",
        }
    }

    /// Returns `true` for the single terminal stage.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl TryFrom<&str> for StageId {
    type Error = ParseStageIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "dev_pending" => Ok(Self::DevPending),
            "dev_in_progress" => Ok(Self::DevInProgress),
            "dev_done" => Ok(Self::DevDone),
            "test_pending" => Ok(Self::TestPending),
            "test_in_progress" => Ok(Self::TestInProgress),
            "test_passed" => Ok(Self::TestPassed),
            "deploy_pending" => Ok(Self::DeployPending),
            "deploying" => Ok(Self::Deploying),
            "deployed" => Ok(Self::Deployed),
            "qa_in_review" => Ok(Self::QaInReview),
            "qa_approved" => Ok(Self::QaApproved),
            "done" => Ok(Self::Done),
            _ => Err(ParseStageIdError(value.to_owned())),
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Grouping label for tabbed board display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageCategory {
    /// Backlog holding area.
    Backlog,
    /// Development stages.
    Development,
    /// Testing stages.
    Testing,
    /// Deployment stages.
    DevOps,
    /// QA review stages.
    Qa,
    /// Completed work.
    Done,
}

impl StageCategory {
    /// All categories in pipeline order.
    pub const ALL: [Self; 6] = [
        Self::Backlog,
        Self::Development,
        Self::Testing,
        Self::DevOps,
        Self::Qa,
        Self::Done,
    ];

    /// Returns the human-readable category name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Development => "Development",
            Self::Testing => "Testing",
            Self::DevOps => "DevOps",
            Self::Qa => "QA Review",
            Self::Done => "Done",
        }
    }

    /// Returns the display colour associated with the category.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Backlog => "#7b68ee",
            Self::Development => "#49ccf9",
            Self::Testing => "#ff6b9d",
            Self::DevOps => "#00d4aa",
            Self::Qa => "#ffa800",
            Self::Done => "#10b981",
        }
    }
}

/// Static descriptor of a pipeline stage.
///
/// Transition legality derives from the configured targets: a stage allows
/// `advance` exactly when it has a next stage and `reject` exactly when it
/// has a reject target, so the descriptor cannot contradict itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    /// Stage identifier.
    pub id: StageId,
    /// Human-readable stage name.
    pub name: &'static str,
    /// Display category the stage belongs to.
    pub category: StageCategory,
    /// Role responsible for work in this stage; `None` for the terminal
    /// stage.
    pub owning_role: Option<Role>,
    /// Display colour for board columns.
    pub color: &'static str,
    /// Target of `advance`, when one exists.
    pub next_stage: Option<StageId>,
    /// Target of `reject`, when one exists.
    pub reject_target: Option<StageId>,
    /// Short description shown in stage headers.
    pub description: &'static str,
}

impl Stage {
    /// Returns `true` when a forward transition is configured.
    #[must_use]
    pub const fn can_advance(&self) -> bool {
        self.next_stage.is_some()
    }

    /// Returns `true` when a backward transition is configured.
    #[must_use]
    pub const fn can_reject(&self) -> bool {
        self.reject_target.is_some()
    }
}
