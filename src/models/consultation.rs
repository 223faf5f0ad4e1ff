//! Consultation model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled meeting between a teacher and a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: i64,
    pub project: i64,
    pub teacher: i64,
    #[serde(default)]
    pub teacher_name: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub consultation_date: DateTime<Utc>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /consultations/` and `PATCH /consultations/{id}/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsultationPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
