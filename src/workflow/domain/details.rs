//! Priority levels and the opaque descriptive fields carried by tasks.
//!
//! Labels, subtasks, and attachments are stored and returned verbatim; the
//! engine never interprets them. Priority is the one descriptive field the
//! read models consume, as a filter predicate.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ParsePriorityError;

/// Task priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low urgency.
    Low,
    /// Default urgency.
    #[default]
    Medium,
    /// High urgency.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coloured text label attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// Label text.
    pub text: String,
    /// Display colour.
    pub color: String,
}

impl Label {
    /// Creates a label.
    #[must_use]
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
        }
    }
}

/// Checklist item attached to a task.
///
/// Subtask completion feeds display roll-ups only; it never affects stage
/// transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    /// Caller-assigned subtask identifier.
    pub id: String,
    /// Subtask text.
    pub text: String,
    /// Whether the subtask is ticked off.
    pub completed: bool,
}

impl Subtask {
    /// Creates an unfinished subtask.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
        }
    }
}

/// Patch of descriptive task fields.
///
/// Fields left as `None` keep their current value; present fields overwrite
/// wholesale. The patch never carries workflow state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDetails {
    /// Replacement description, stored verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement label set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    /// Replacement subtask list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
    /// Replacement attachment payloads, opaque to the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Value>>,
}

impl TaskDetails {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement label set.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = Label>) -> Self {
        self.labels = Some(labels.into_iter().collect());
        self
    }

    /// Sets the replacement subtask list.
    #[must_use]
    pub fn with_subtasks(mut self, subtasks: impl IntoIterator<Item = Subtask>) -> Self {
        self.subtasks = Some(subtasks.into_iter().collect());
        self
    }

    /// Sets the replacement attachment payloads.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = Value>) -> Self {
        self.attachments = Some(attachments.into_iter().collect());
        self
    }
}
