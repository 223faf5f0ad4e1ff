//! Milestone model matching the backend `Milestone` resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored lifecycle status of a milestone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    NotStarted,
    InProgress,
    Completed,
    Overdue,
    #[serde(other)]
    Unknown,
}

/// A dated sub-goal of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub id: i64,
    pub project: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Completion percentage; `None` means 0
    #[serde(default)]
    pub completion: Option<i64>,
    pub deadline: DateTime<Utc>,
    pub status: MilestoneStatus,
    #[serde(default)]
    pub status_display: String,
}

impl Milestone {
    /// Completion with the null-means-zero rule applied.
    pub fn completion_or_zero(&self) -> i64 {
        self.completion.unwrap_or(0)
    }
}

/// Body of `POST /milestones/` and `PATCH /milestones/{id}/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MilestonePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MilestoneStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<i64>,
}

/// Body of `POST /milestones/{id}/update_completion/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionUpdate {
    pub completion: i64,
}
