//! Project badges, role-based visibility and grouping.

use serde::Serialize;

use super::BadgeColor;
use crate::models::{Project, ProjectStatus, ProjectTeacher, Role, TeacherRole, User};

/// Badge color for a project status.
pub fn project_status_color(status: ProjectStatus) -> BadgeColor {
    match status {
        ProjectStatus::Draft => BadgeColor::Gray,
        ProjectStatus::InProgress => BadgeColor::Blue,
        ProjectStatus::Submitted => BadgeColor::Yellow,
        ProjectStatus::Evaluated => BadgeColor::Blue,
        ProjectStatus::Completed => BadgeColor::Green,
        ProjectStatus::Unknown => BadgeColor::Gray,
    }
}

/// Plural group heading used on the "my projects" page.
pub fn project_status_group_label(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Draft => "Náčrt",
        ProjectStatus::InProgress => "Rozpracované",
        ProjectStatus::Submitted => "Odevzdané",
        ProjectStatus::Evaluated => "Ohodnocené",
        ProjectStatus::Completed => "Dokončené",
        ProjectStatus::Unknown => "Ostatní",
    }
}

/// Evaluations are only possible once the project has been submitted.
pub fn can_be_evaluated(status: ProjectStatus) -> bool {
    matches!(
        status,
        ProjectStatus::Submitted | ProjectStatus::Evaluated | ProjectStatus::Completed
    )
}

/// The user is the student who owns the project.
pub fn is_project_owner(project: &Project, user: Option<&User>) -> bool {
    user.is_some_and(|u| u.role == Role::Student && project.student == u.id)
}

/// The user is a teacher with an accepted assignment on the project.
pub fn is_assigned_teacher(project: &Project, user: Option<&User>) -> bool {
    let Some(user) = user else {
        return false;
    };
    user.role == Role::Teacher
        && project
            .teacher_assignments()
            .iter()
            .any(|a| a.teacher == user.id && a.accepted)
}

/// Admins, accepted teachers and the owner see the authenticated routes.
pub fn has_private_access(project: &Project, user: Option<&User>) -> bool {
    user.is_some_and(|u| u.role == Role::Admin)
        || is_assigned_teacher(project, user)
        || is_project_owner(project, user)
}

/// Which link is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAction {
    View,
    Edit,
}

/// Resolve a project link for the current user.
///
/// Without private access both actions degrade to the public read-only page.
pub fn project_path(project: &Project, user: Option<&User>, action: PathAction) -> String {
    if has_private_access(project, user) {
        match action {
            PathAction::View => format!("/dashboard/projects/{}", project.id),
            PathAction::Edit => format!("/dashboard/projects/{}/edit", project.id),
        }
    } else {
        format!("/projects-public/{}", project.id)
    }
}

/// State of the "submit project" action.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SubmitAction {
    /// Shown to the owning student while the project is a draft
    pub visible: bool,
    /// Requires an attached document
    pub enabled: bool,
}

pub fn submit_action(project: &Project, user: Option<&User>) -> SubmitAction {
    let visible = is_project_owner(project, user) && project.status == ProjectStatus::Draft;
    SubmitAction {
        visible,
        enabled: visible && project.document.is_some(),
    }
}

/// Turn a stored file path into an absolute link.
pub fn media_url(media_base: &str, path: Option<&str>) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    Some(format!("{}{}", media_base.trim_end_matches('/'), path))
}

/// Projects a teacher holds under one assignment role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleGroup<T> {
    pub role: TeacherRole,
    pub label: &'static str,
    pub projects: Vec<T>,
}

/// Group projects by the roles the assignments give, in fixed display order.
///
/// A project appears at most once per role.
pub fn group_by_role(projects: &[Project], assignments: &[ProjectTeacher]) -> Vec<RoleGroup<Project>> {
    TeacherRole::DISPLAY_ORDER
        .iter()
        .map(|role| {
            let mut grouped: Vec<Project> = Vec::new();
            for project in projects {
                let holds_role = assignments
                    .iter()
                    .any(|a| a.project == project.id && a.role == *role);
                if holds_role && !grouped.iter().any(|p| p.id == project.id) {
                    grouped.push(project.clone());
                }
            }
            RoleGroup {
                role: *role,
                label: role.label(),
                projects: grouped,
            }
        })
        .collect()
}

/// Projects sharing one status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusGroup<T> {
    pub status: ProjectStatus,
    pub label: &'static str,
    pub projects: Vec<T>,
}

/// Display order of the "my projects" groups.
const STATUS_GROUP_ORDER: [ProjectStatus; 5] = [
    ProjectStatus::InProgress,
    ProjectStatus::Draft,
    ProjectStatus::Submitted,
    ProjectStatus::Evaluated,
    ProjectStatus::Completed,
];

pub fn group_by_status(projects: &[Project]) -> Vec<StatusGroup<Project>> {
    STATUS_GROUP_ORDER
        .iter()
        .map(|status| StatusGroup {
            status: *status,
            label: project_status_group_label(*status),
            projects: projects
                .iter()
                .filter(|p| p.status == *status)
                .cloned()
                .collect(),
        })
        .collect()
}
