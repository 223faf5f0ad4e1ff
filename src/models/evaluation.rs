//! Project evaluation model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A teacher's scored assessment of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEvaluation {
    pub id: i64,
    pub project: i64,
    pub teacher: i64,
    #[serde(default)]
    pub teacher_name: String,
    pub evaluation: String,
    pub score: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /evaluations/` and `PATCH /evaluations/{id}/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}
