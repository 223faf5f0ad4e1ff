//! Evaluation dashboard and per-project evaluations.

use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::Serialize;

use super::{fetch_projects, page, project_title, redirect, require_user, ActionResult, PageResult, Viewer};
use crate::auth::AuthContext;
use crate::display::{
    average_score, can_add_evaluation, can_be_evaluated, can_manage_evaluation,
    group_evaluations_by_project, has_evaluated, sort_newest_first,
};
use crate::errors::AppError;
use crate::forms::{Confirmation, EvaluationForm};
use crate::models::{Project, ProjectEvaluation, ProjectPayload, ProjectStatus, Role};

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationItem {
    pub evaluation: ProjectEvaluation,
    pub is_mine: bool,
    pub can_manage: bool,
}

#[derive(Debug, Serialize)]
pub struct ProjectEvaluationGroup {
    pub project_id: i64,
    pub project_title: Option<String>,
    pub average_score: i64,
    pub evaluations: Vec<EvaluationItem>,
}

#[derive(Debug, Serialize)]
pub struct EvaluationDashboardPage {
    pub viewer: Viewer,
    pub groups: Vec<ProjectEvaluationGroup>,
}

/// GET /dashboard/evaluations
///
/// Admins see every evaluation, teachers only their own.
pub async fn evaluation_dashboard_page(
    Extension(auth): Extension<AuthContext>,
) -> PageResult<EvaluationDashboardPage> {
    let user = require_user(auth.state())?;
    let client = auth.client();

    let mut evaluations: Vec<ProjectEvaluation> = client
        .list_evaluations(None)
        .await?
        .results
        .into_iter()
        .filter(|e| match user.role {
            Role::Admin => true,
            Role::Teacher => e.teacher == user.id,
            _ => false,
        })
        .collect();
    sort_newest_first(&mut evaluations);

    let projects = fetch_projects(client, evaluations.iter().map(|e| e.project).collect()).await;

    let groups = group_evaluations_by_project(&evaluations)
        .into_iter()
        .map(|group| ProjectEvaluationGroup {
            project_id: group.project,
            project_title: project_title(&projects, group.project),
            average_score: group.average_score,
            evaluations: group
                .evaluations
                .into_iter()
                .map(|e| EvaluationItem {
                    is_mine: e.teacher == user.id,
                    can_manage: can_manage_evaluation(&e, Some(user)),
                    evaluation: e,
                })
                .collect(),
        })
        .collect();

    page(EvaluationDashboardPage {
        viewer: Viewer::from_state(auth.state()),
        groups,
    })
}

#[derive(Debug, Serialize)]
pub struct ProjectEvaluationsPage {
    pub viewer: Viewer,
    pub project_id: i64,
    pub project_title: String,
    pub project_status: ProjectStatus,
    pub average_score: i64,
    /// Newest first
    pub evaluations: Vec<EvaluationItem>,
    pub can_be_evaluated: bool,
    pub has_evaluated: bool,
    pub can_add: bool,
}

/// GET /dashboard/projects/{id}/evaluations
pub async fn project_evaluations_page(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> PageResult<ProjectEvaluationsPage> {
    let client = auth.client();
    let project = client.get_project(id).await?;
    let mut evaluations = client.list_evaluations(Some(id)).await?.results;
    sort_newest_first(&mut evaluations);

    let user = auth.user();
    page(ProjectEvaluationsPage {
        viewer: Viewer::from_state(auth.state()),
        project_id: id,
        project_status: project.status,
        average_score: average_score(&evaluations),
        can_be_evaluated: can_be_evaluated(project.status),
        has_evaluated: has_evaluated(&evaluations, user),
        can_add: can_add_evaluation(&project, &evaluations, user),
        evaluations: evaluations
            .into_iter()
            .map(|e| EvaluationItem {
                is_mine: user.is_some_and(|u| u.id == e.teacher),
                can_manage: can_manage_evaluation(&e, user),
                evaluation: e,
            })
            .collect(),
        project_title: project.title,
    })
}

fn evaluations_path(project: i64) -> String {
    format!("/dashboard/projects/{}/evaluations", project)
}

/// Move a freshly evaluated project out of `submitted`.
async fn mark_evaluated(auth: &AuthContext, project: &Project) -> Result<(), AppError> {
    if project.status == ProjectStatus::Submitted {
        let payload = ProjectPayload {
            status: Some(ProjectStatus::Evaluated),
            ..Default::default()
        };
        auth.client().update_project(project.id, &payload).await?;
        tracing::info!(project = project.id, "Marked project as evaluated");
    }
    Ok(())
}

/// POST /dashboard/projects/{id}/evaluations
pub async fn create_evaluation(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(form): Json<EvaluationForm>,
) -> ActionResult {
    let payload = form.validate(id)?;
    let client = auth.client();
    let project = client.get_project(id).await?;
    let evaluations = client.list_evaluations(Some(id)).await?.results;
    if !can_add_evaluation(&project, &evaluations, auth.user()) {
        return Err(AppError::Validation(
            "Tento projekt nyní nemůžete hodnotit".to_string(),
        ));
    }
    client.create_evaluation(&payload).await?;
    mark_evaluated(&auth, &project).await?;
    redirect(evaluations_path(id))
}

/// PATCH /dashboard/projects/{id}/evaluations/{evaluation_id}
pub async fn update_evaluation(
    Extension(auth): Extension<AuthContext>,
    Path((id, evaluation_id)): Path<(i64, i64)>,
    Json(form): Json<EvaluationForm>,
) -> ActionResult {
    let payload = form.validate(id)?;
    let client = auth.client();
    client.update_evaluation(evaluation_id, &payload).await?;
    let project = client.get_project(id).await?;
    mark_evaluated(&auth, &project).await?;
    redirect(evaluations_path(id))
}

/// DELETE /dashboard/projects/{id}/evaluations/{evaluation_id}
pub async fn delete_evaluation(
    Extension(auth): Extension<AuthContext>,
    Path((id, evaluation_id)): Path<(i64, i64)>,
    Json(confirmation): Json<Confirmation>,
) -> ActionResult {
    confirmation.require()?;
    auth.client().delete_evaluation(evaluation_id).await?;
    redirect(evaluations_path(id))
}
