//! Milestone dashboard and per-project milestone management.

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{
    blank_as_none, blank_variant_as_none, fetch_projects, page, project_title, redirect,
    ActionResult, PageResult, Viewer,
};
use crate::auth::AuthContext;
use crate::display::{
    days_message, has_private_access, milestone_display, pending_completion, sort_milestones,
    summarize_milestones, MilestoneDisplay, MilestoneSummary,
};
use crate::errors::AppError;
use crate::forms::{CompletionForm, Confirmation, MilestoneForm};
use crate::models::{Milestone, MilestoneStatus, Project};
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct MilestoneItem {
    pub milestone: Milestone,
    pub display: MilestoneDisplay,
    pub days_message: String,
    pub project_title: Option<String>,
    pub can_update: bool,
}

fn milestone_items(
    milestones: Vec<Milestone>,
    projects: &[Project],
    auth: &AuthContext,
    state: &AppState,
) -> Vec<MilestoneItem> {
    let now = Utc::now();
    let locale = state.config.locale;
    milestones
        .into_iter()
        .map(|m| {
            let project = projects.iter().find(|p| p.id == m.project);
            MilestoneItem {
                display: milestone_display(&m, now, locale),
                days_message: days_message(m.deadline, now, locale),
                project_title: project_title(projects, m.project),
                can_update: project.is_some_and(|p| has_private_access(p, auth.user())),
                milestone: m,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MilestoneFilterQuery {
    #[serde(default, deserialize_with = "blank_variant_as_none")]
    pub status: Option<MilestoneStatus>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub project: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProjectOption {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct MilestoneDashboardPage {
    pub viewer: Viewer,
    pub summary: MilestoneSummary,
    pub milestones: Vec<MilestoneItem>,
    pub projects: Vec<ProjectOption>,
}

/// GET /dashboard/milestones
pub async fn milestone_dashboard_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<MilestoneFilterQuery>,
) -> PageResult<MilestoneDashboardPage> {
    let client = auth.client();
    let now = Utc::now();

    let all = client.list_milestones(None).await?.results;
    let projects = fetch_projects(client, all.iter().map(|m| m.project).collect()).await;
    let summary = summarize_milestones(&all, now);

    let mut filtered: Vec<Milestone> = all
        .into_iter()
        .filter(|m| query.status.map_or(true, |s| m.status == s))
        .filter(|m| query.project.map_or(true, |p| m.project == p))
        .collect();
    sort_milestones(&mut filtered, now);

    page(MilestoneDashboardPage {
        viewer: Viewer::from_state(auth.state()),
        summary,
        milestones: milestone_items(filtered, &projects, &auth, &state),
        projects: projects
            .iter()
            .map(|p| ProjectOption {
                id: p.id,
                title: p.title.clone(),
            })
            .collect(),
    })
}

/// Send a completion change unless it equals the value the backend holds.
async fn apply_completion(auth: &AuthContext, id: i64, form: &CompletionForm) -> Result<(), AppError> {
    let completion = form.validate()?;
    let stored = auth.client().get_milestone(id).await?;
    match pending_completion(stored.completion, completion) {
        Some(completion) => {
            auth.client().update_completion(id, completion).await?;
            tracing::debug!(milestone = id, completion, "Updated completion");
        }
        None => tracing::debug!(milestone = id, "Completion unchanged, nothing to send"),
    }
    Ok(())
}

/// POST /dashboard/milestones/{milestone_id}/completion
pub async fn update_dashboard_completion(
    Extension(auth): Extension<AuthContext>,
    Path(milestone_id): Path<i64>,
    Json(form): Json<CompletionForm>,
) -> ActionResult {
    apply_completion(&auth, milestone_id, &form).await?;
    redirect("/dashboard/milestones")
}

#[derive(Debug, Serialize)]
pub struct ProjectMilestonesPage {
    pub viewer: Viewer,
    pub project_id: i64,
    pub project_title: String,
    pub milestones: Vec<MilestoneItem>,
    pub can_manage: bool,
}

/// GET /dashboard/projects/{id}/milestones
pub async fn project_milestones_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> PageResult<ProjectMilestonesPage> {
    let client = auth.client();
    let project = client.get_project(id).await?;
    let mut milestones = client.list_milestones(Some(id)).await?.results;
    sort_milestones(&mut milestones, Utc::now());

    let can_manage = has_private_access(&project, auth.user());
    let projects = [project];
    page(ProjectMilestonesPage {
        viewer: Viewer::from_state(auth.state()),
        project_id: id,
        milestones: milestone_items(milestones, &projects, &auth, &state),
        project_title: projects[0].title.clone(),
        can_manage,
    })
}

fn milestones_path(project: i64) -> String {
    format!("/dashboard/projects/{}/milestones", project)
}

/// POST /dashboard/projects/{id}/milestones
pub async fn create_milestone(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(form): Json<MilestoneForm>,
) -> ActionResult {
    let payload = form.validate(id)?;
    auth.client().create_milestone(&payload).await?;
    redirect(milestones_path(id))
}

/// PATCH /dashboard/projects/{id}/milestones/{milestone_id}
pub async fn update_milestone(
    Extension(auth): Extension<AuthContext>,
    Path((id, milestone_id)): Path<(i64, i64)>,
    Json(form): Json<MilestoneForm>,
) -> ActionResult {
    let payload = form.validate(id)?;
    auth.client().update_milestone(milestone_id, &payload).await?;
    redirect(milestones_path(id))
}

/// DELETE /dashboard/projects/{id}/milestones/{milestone_id}
pub async fn delete_milestone(
    Extension(auth): Extension<AuthContext>,
    Path((id, milestone_id)): Path<(i64, i64)>,
    Json(confirmation): Json<Confirmation>,
) -> ActionResult {
    confirmation.require()?;
    auth.client().delete_milestone(milestone_id).await?;
    redirect(milestones_path(id))
}

/// POST /dashboard/projects/{id}/milestones/{milestone_id}/completion
pub async fn update_project_completion(
    Extension(auth): Extension<AuthContext>,
    Path((id, milestone_id)): Path<(i64, i64)>,
    Json(form): Json<CompletionForm>,
) -> ActionResult {
    apply_completion(&auth, milestone_id, &form).await?;
    redirect(milestones_path(id))
}
