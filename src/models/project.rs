//! Project model and its teacher assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Comment, Consultation, Milestone, ProjectEvaluation};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    InProgress,
    Submitted,
    Evaluated,
    Completed,
    #[serde(other)]
    Unknown,
}

impl ProjectStatus {
    /// Every known status, in lifecycle order.
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::Draft,
        ProjectStatus::InProgress,
        ProjectStatus::Submitted,
        ProjectStatus::Evaluated,
        ProjectStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Submitted => "submitted",
            ProjectStatus::Evaluated => "evaluated",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Unknown => "unknown",
        }
    }
}

/// Type of student work.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WorkType {
    #[serde(rename = "SOČ")]
    Soc,
    #[serde(rename = "seminar")]
    Seminar,
    #[serde(rename = "other")]
    #[serde(other)]
    Other,
}

impl WorkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::Soc => "SOČ",
            WorkType::Seminar => "seminar",
            WorkType::Other => "other",
        }
    }

    /// Czech display label.
    pub fn label(&self) -> &'static str {
        match self {
            WorkType::Soc => "Středoškolská odborná činnost",
            WorkType::Seminar => "Seminární práce",
            WorkType::Other => "Jiný typ práce",
        }
    }
}

/// Role a teacher holds on a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TeacherRole {
    Supervisor,
    Consultant,
    Opponent,
    #[serde(other)]
    Unknown,
}

impl TeacherRole {
    /// Fixed display order of assignment roles.
    pub const DISPLAY_ORDER: [TeacherRole; 3] = [
        TeacherRole::Supervisor,
        TeacherRole::Consultant,
        TeacherRole::Opponent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeacherRole::Supervisor => "supervisor",
            TeacherRole::Consultant => "consultant",
            TeacherRole::Opponent => "opponent",
            TeacherRole::Unknown => "unknown",
        }
    }

    /// Czech display label.
    pub fn label(&self) -> &'static str {
        match self {
            TeacherRole::Supervisor => "Vedoucí práce",
            TeacherRole::Consultant => "Konzultant",
            TeacherRole::Opponent => "Oponent",
            TeacherRole::Unknown => "Neznámá role",
        }
    }
}

/// Link record granting a teacher a role on a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTeacher {
    pub id: i64,
    pub project: i64,
    pub teacher: i64,
    #[serde(default)]
    pub teacher_name: String,
    pub role: TeacherRole,
    #[serde(default)]
    pub role_display: String,
    /// The assignment only counts once the teacher accepted it
    #[serde(default)]
    pub accepted: bool,
}

/// Body of `POST /project-teachers/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignTeacherRequest {
    pub project: i64,
    pub teacher: i64,
    pub role: TeacherRole,
}

/// A student's project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub year: i32,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub student: i64,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub public_visibility: bool,
    pub status: ProjectStatus,
    #[serde(default)]
    pub status_display: String,
    pub type_of_work: WorkType,
    #[serde(default)]
    pub type_display: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    // Relations (only in detail view)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teachers: Option<Vec<ProjectTeacher>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestones: Option<Vec<Milestone>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultations: Option<Vec<Consultation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluations: Option<Vec<ProjectEvaluation>>,
}

impl Project {
    /// Nested teacher assignments, empty when the list view omitted them.
    pub fn teacher_assignments(&self) -> &[ProjectTeacher] {
        self.teachers.as_deref().unwrap_or(&[])
    }
}

/// Body of `POST /projects/` and `PATCH /projects/{id}/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of_work: Option<WorkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_visibility: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}
