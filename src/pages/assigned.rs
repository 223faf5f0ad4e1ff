//! Projects a teacher is assigned to, and accepting or declining assignments.

use axum::extract::{Extension, Path, State};
use serde::Serialize;

use super::projects::{project_card, ProjectCard};
use super::{fetch_projects, page, redirect, require_user, ActionResult, PageResult, Viewer};
use crate::auth::AuthContext;
use crate::display::group_by_role;
use crate::models::{ProjectTeacher, TeacherRole};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AssignedProject {
    pub card: ProjectCard,
    pub assignment: Option<ProjectTeacher>,
}

#[derive(Debug, Serialize)]
pub struct AssignedRoleGroup {
    pub role: TeacherRole,
    pub label: &'static str,
    pub projects: Vec<AssignedProject>,
}

#[derive(Debug, Serialize)]
pub struct AssignedPage {
    pub viewer: Viewer,
    /// Assignments still waiting for this teacher's answer
    pub pending: Vec<ProjectTeacher>,
    pub groups: Vec<AssignedRoleGroup>,
}

/// GET /dashboard/assigned
pub async fn assigned_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> PageResult<AssignedPage> {
    let user = require_user(auth.state())?;
    let client = auth.client();

    let assignments: Vec<ProjectTeacher> = client
        .list_project_teachers(None)
        .await?
        .results
        .into_iter()
        .filter(|a| a.teacher == user.id)
        .collect();

    let projects = fetch_projects(client, assignments.iter().map(|a| a.project).collect()).await;

    let groups = group_by_role(&projects, &assignments)
        .into_iter()
        .map(|group| AssignedRoleGroup {
            role: group.role,
            label: group.label,
            projects: group
                .projects
                .iter()
                .map(|p| AssignedProject {
                    card: project_card(p, Some(user), &state.config.media_url),
                    assignment: assignments
                        .iter()
                        .find(|a| a.project == p.id && a.role == group.role)
                        .cloned(),
                })
                .collect(),
        })
        .collect();

    page(AssignedPage {
        viewer: Viewer::from_state(auth.state()),
        pending: assignments.iter().filter(|a| !a.accepted).cloned().collect(),
        groups,
    })
}

/// POST /dashboard/assigned/{assignment_id}/accept
pub async fn accept_assignment(
    Extension(auth): Extension<AuthContext>,
    Path(assignment_id): Path<i64>,
) -> ActionResult {
    auth.client().accept_assignment(assignment_id).await?;
    tracing::info!(assignment = assignment_id, "Accepted assignment");
    redirect("/dashboard/assigned")
}

/// POST /dashboard/assigned/{assignment_id}/decline
pub async fn decline_assignment(
    Extension(auth): Extension<AuthContext>,
    Path(assignment_id): Path<i64>,
) -> ActionResult {
    auth.client().decline_assignment(assignment_id).await?;
    tracing::info!(assignment = assignment_id, "Declined assignment");
    redirect("/dashboard/assigned")
}
