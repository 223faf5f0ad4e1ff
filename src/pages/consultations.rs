//! Consultation dashboard and per-project consultations.

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{fetch_projects, page, project_title, redirect, require_user, ActionResult, PageResult, Viewer};
use crate::auth::AuthContext;
use crate::display::{filter_consultations, group_by_date, is_assigned_teacher, DateFilter};
use crate::forms::{Confirmation, ConsultationForm};
use crate::models::{Consultation, Role};

#[derive(Debug, Clone, Serialize)]
pub struct ConsultationItem {
    pub consultation: Consultation,
    pub project_title: Option<String>,
    pub is_past: bool,
}

#[derive(Debug, Serialize)]
pub struct ConsultationDay {
    pub date: NaiveDate,
    pub consultations: Vec<ConsultationItem>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DateFilterQuery {
    #[serde(default)]
    pub filter: DateFilter,
}

#[derive(Debug, Serialize)]
pub struct ConsultationDashboardPage {
    pub viewer: Viewer,
    pub filter: DateFilter,
    pub days: Vec<ConsultationDay>,
    pub total: usize,
}

/// GET /dashboard/consultations
///
/// Admins see every consultation, teachers only their own.
pub async fn consultation_dashboard_page(
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<DateFilterQuery>,
) -> PageResult<ConsultationDashboardPage> {
    let user = require_user(auth.state())?;
    let client = auth.client();
    let now = Utc::now();

    let consultations: Vec<Consultation> = client
        .list_consultations(None)
        .await?
        .results
        .into_iter()
        .filter(|c| match user.role {
            Role::Admin => true,
            Role::Teacher => c.teacher == user.id,
            _ => false,
        })
        .collect();

    let projects = fetch_projects(client, consultations.iter().map(|c| c.project).collect()).await;

    let filtered = filter_consultations(&consultations, query.filter, now);
    let days = group_by_date(&filtered, query.filter)
        .into_iter()
        .map(|day| ConsultationDay {
            date: day.date,
            consultations: day
                .consultations
                .into_iter()
                .map(|c| ConsultationItem {
                    project_title: project_title(&projects, c.project),
                    is_past: c.consultation_date < now,
                    consultation: c,
                })
                .collect(),
        })
        .collect();

    page(ConsultationDashboardPage {
        viewer: Viewer::from_state(auth.state()),
        filter: query.filter,
        total: filtered.len(),
        days,
    })
}

#[derive(Debug, Serialize)]
pub struct ProjectConsultationsPage {
    pub viewer: Viewer,
    pub project_id: i64,
    pub project_title: String,
    /// Most recent first
    pub consultations: Vec<ConsultationItem>,
    pub can_manage: bool,
}

/// GET /dashboard/projects/{id}/consultations
pub async fn project_consultations_page(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> PageResult<ProjectConsultationsPage> {
    let client = auth.client();
    let project = client.get_project(id).await?;
    let mut consultations = client.list_consultations(Some(id)).await?.results;
    consultations.sort_by(|a, b| b.consultation_date.cmp(&a.consultation_date));

    let now = Utc::now();
    let can_manage = auth.state().is_admin() || is_assigned_teacher(&project, auth.user());
    page(ProjectConsultationsPage {
        viewer: Viewer::from_state(auth.state()),
        project_id: id,
        consultations: consultations
            .into_iter()
            .map(|c| ConsultationItem {
                project_title: Some(project.title.clone()),
                is_past: c.consultation_date < now,
                consultation: c,
            })
            .collect(),
        project_title: project.title,
        can_manage,
    })
}

fn consultations_path(project: i64) -> String {
    format!("/dashboard/projects/{}/consultations", project)
}

/// POST /dashboard/projects/{id}/consultations
pub async fn create_consultation(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(form): Json<ConsultationForm>,
) -> ActionResult {
    let payload = form.validate(id)?;
    auth.client().create_consultation(&payload).await?;
    redirect(consultations_path(id))
}

/// PATCH /dashboard/projects/{id}/consultations/{consultation_id}
pub async fn update_consultation(
    Extension(auth): Extension<AuthContext>,
    Path((id, consultation_id)): Path<(i64, i64)>,
    Json(form): Json<ConsultationForm>,
) -> ActionResult {
    let payload = form.validate(id)?;
    auth.client()
        .update_consultation(consultation_id, &payload)
        .await?;
    redirect(consultations_path(id))
}

/// DELETE /dashboard/projects/{id}/consultations/{consultation_id}
pub async fn delete_consultation(
    Extension(auth): Extension<AuthContext>,
    Path((id, consultation_id)): Path<(i64, i64)>,
    Json(confirmation): Json<Confirmation>,
) -> ActionResult {
    confirmation.require()?;
    auth.client().delete_consultation(consultation_id).await?;
    redirect(consultations_path(id))
}
