//! Project comment model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Role;

/// A comment left on a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub project: i64,
    pub user: i64,
    #[serde(default)]
    pub user_name: String,
    pub user_role: Role,
    pub comment_text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /comments/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub project: i64,
    pub comment_text: String,
}
