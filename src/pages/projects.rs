//! Project list, detail, create, edit, delete, submit and teacher assignment.

use axum::{
    extract::{Extension, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::{
    accumulate, blank_as_none, blank_variant_as_none, page, redirect, require_user, ActionResult,
    PageResult, Viewer,
};
use crate::auth::AuthContext;
use crate::display::{
    average_score, can_add_evaluation, can_be_evaluated, has_private_access, is_assigned_teacher,
    is_project_owner, media_url, milestone_display, project_path, project_status_color,
    project_status_group_label, sort_milestones, submit_action, BadgeColor, Listing, MilestoneDisplay, PathAction,
    SubmitAction,
};
use crate::errors::AppError;
use crate::forms::{AssignTeacherForm, Confirmation, ProjectForm};
use crate::models::{
    Milestone, Project, ProjectFilters, ProjectStatus, ProjectTeacher, Role, User, WorkType,
};
use crate::AppState;

/// Project as shown in lists.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub id: i64,
    pub title: String,
    pub student_name: String,
    pub year: i32,
    pub field: String,
    pub keywords: Vec<String>,
    pub status: ProjectStatus,
    pub status_display: String,
    pub status_color: BadgeColor,
    pub type_of_work: WorkType,
    pub type_display: String,
    pub thumbnail_url: Option<String>,
    pub view_path: String,
    pub edit_path: String,
}

pub fn project_card(project: &Project, user: Option<&User>, media_base: &str) -> ProjectCard {
    let type_display = if project.type_display.is_empty() {
        project.type_of_work.label().to_string()
    } else {
        project.type_display.clone()
    };
    ProjectCard {
        id: project.id,
        title: project.title.clone(),
        student_name: project.student_name.clone(),
        year: project.year,
        field: project.field.clone(),
        keywords: project.keywords.clone(),
        status: project.status,
        status_display: project.status_display.clone(),
        status_color: project_status_color(project.status),
        type_of_work: project.type_of_work,
        type_display,
        thumbnail_url: media_url(media_base, project.thumbnail.as_deref()),
        view_path: project_path(project, user, PathAction::View),
        edit_path: project_path(project, user, PathAction::Edit),
    }
}

/// Absolute links to the files attached to a project.
#[derive(Debug, Clone, Serialize)]
pub struct MediaLinks {
    pub thumbnail: Option<String>,
    pub document: Option<String>,
    pub poster: Option<String>,
    pub video: Option<String>,
}

impl MediaLinks {
    pub fn of(project: &Project, media_base: &str) -> Self {
        Self {
            thumbnail: media_url(media_base, project.thumbnail.as_deref()),
            document: media_url(media_base, project.document.as_deref()),
            poster: media_url(media_base, project.poster.as_deref()),
            video: media_url(media_base, project.video.as_deref()),
        }
    }
}

/// Query string of the project lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default, deserialize_with = "blank_variant_as_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, deserialize_with = "blank_variant_as_none")]
    pub type_of_work: Option<WorkType>,
    #[serde(default)]
    pub keywords: Option<String>,
    /// Number of pages loaded so far
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<u32>,
}

impl ProjectListQuery {
    pub fn filters(&self) -> ProjectFilters {
        ProjectFilters {
            search: self.search.clone(),
            year: self.year,
            field: self.field.clone(),
            status: self.status,
            type_of_work: self.type_of_work,
            keywords: self.keywords.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusOption {
    pub value: ProjectStatus,
    pub label: &'static str,
    pub color: BadgeColor,
}

#[derive(Debug, Serialize)]
pub struct ProjectListPage {
    pub viewer: Viewer,
    pub filters: ProjectFilters,
    pub status_options: Vec<StatusOption>,
    pub listing: Listing<ProjectCard>,
    pub can_create: bool,
}

/// GET /dashboard/projects
pub async fn project_list_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ProjectListQuery>,
) -> PageResult<ProjectListPage> {
    let client = auth.client();
    let filters = query.filters();
    let listing = accumulate(query.page, |page| {
        client.list_visible_projects(&filters, Some(page))
    })
    .await?;

    let user = auth.user();
    page(ProjectListPage {
        viewer: Viewer::from_state(auth.state()),
        listing: listing.map_items(|p| project_card(&p, user, &state.config.media_url)),
        filters,
        status_options: ProjectStatus::ALL
            .iter()
            .map(|&status| StatusOption {
                value: status,
                label: project_status_group_label(status),
                color: project_status_color(status),
            })
            .collect(),
        can_create: auth.state().is_student(),
    })
}

/// Actions available on the detail page.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectActions {
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_manage_teachers: bool,
    pub can_manage_milestones: bool,
    pub can_view_evaluations: bool,
    pub can_be_evaluated: bool,
    pub can_add_evaluation: bool,
    pub submit: SubmitAction,
}

impl ProjectActions {
    pub fn of(project: &Project, user: Option<&User>) -> Self {
        let is_admin = user.is_some_and(|u| u.role == Role::Admin);
        let is_owner = is_project_owner(project, user);
        let is_teacher = user.is_some_and(|u| u.role == Role::Teacher);
        let evaluations = project.evaluations.as_deref().unwrap_or(&[]);
        Self {
            can_edit: has_private_access(project, user),
            can_delete: is_owner || is_admin,
            can_manage_teachers: is_owner || is_admin,
            can_manage_milestones: has_private_access(project, user),
            can_view_evaluations: is_teacher || is_admin,
            can_be_evaluated: can_be_evaluated(project.status),
            can_add_evaluation: can_add_evaluation(project, evaluations, user),
            submit: submit_action(project, user),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentView {
    pub assignment: ProjectTeacher,
    pub role_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MilestoneView {
    pub milestone: Milestone,
    pub display: MilestoneDisplay,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailPage {
    pub viewer: Viewer,
    pub project: Project,
    pub status_color: BadgeColor,
    pub type_label: &'static str,
    pub media: MediaLinks,
    pub teachers: Vec<AssignmentView>,
    pub milestones: Vec<MilestoneView>,
    pub average_score: i64,
    pub evaluation_count: usize,
    pub is_assigned_teacher: bool,
    pub actions: ProjectActions,
}

/// GET /dashboard/projects/{id}
pub async fn project_detail_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> PageResult<ProjectDetailPage> {
    let project = auth.client().get_project(id).await?;
    let user = auth.user();
    let now = Utc::now();

    let teachers = project
        .teacher_assignments()
        .iter()
        .map(|a| AssignmentView {
            assignment: a.clone(),
            role_label: a.role.label(),
        })
        .collect();

    let mut milestones = project.milestones.clone().unwrap_or_default();
    sort_milestones(&mut milestones, now);
    let milestones = milestones
        .into_iter()
        .map(|m| MilestoneView {
            display: milestone_display(&m, now, state.config.locale),
            milestone: m,
        })
        .collect();

    let evaluations = project.evaluations.as_deref().unwrap_or(&[]);

    page(ProjectDetailPage {
        viewer: Viewer::from_state(auth.state()),
        status_color: project_status_color(project.status),
        type_label: project.type_of_work.label(),
        media: MediaLinks::of(&project, &state.config.media_url),
        teachers,
        milestones,
        average_score: average_score(evaluations),
        evaluation_count: evaluations.len(),
        is_assigned_teacher: is_assigned_teacher(&project, user),
        actions: ProjectActions::of(&project, user),
        project,
    })
}

#[derive(Debug, Serialize)]
pub struct WorkTypeOption {
    pub value: WorkType,
    pub label: &'static str,
}

fn work_type_options() -> Vec<WorkTypeOption> {
    [WorkType::Soc, WorkType::Seminar, WorkType::Other]
        .into_iter()
        .map(|value| WorkTypeOption {
            value,
            label: value.label(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ProjectFormPage {
    pub viewer: Viewer,
    pub project: Option<Project>,
    pub default_year: i32,
    pub max_year: i32,
    pub work_types: Vec<WorkTypeOption>,
}

/// GET /dashboard/create-project
pub async fn create_project_page(Extension(auth): Extension<AuthContext>) -> PageResult<ProjectFormPage> {
    let year = Utc::now().year();
    page(ProjectFormPage {
        viewer: Viewer::from_state(auth.state()),
        project: None,
        default_year: year,
        max_year: year + 1,
        work_types: work_type_options(),
    })
}

/// POST /dashboard/create-project
pub async fn create_project(
    Extension(auth): Extension<AuthContext>,
    Json(form): Json<ProjectForm>,
) -> ActionResult {
    let payload = form.validate(Utc::now().year())?;
    let project = auth.client().create_project(&payload).await?;
    tracing::info!(project = project.id, "Created project");
    redirect("/dashboard/my-projects")
}

/// GET /dashboard/projects/{id}/edit
///
/// Visitors without edit rights are sent to wherever their edit link resolves.
pub async fn edit_project_page(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let project = auth.client().get_project(id).await?;
    let user = auth.user();
    if !has_private_access(&project, user) {
        return Ok(Redirect::to(&project_path(&project, user, PathAction::Edit)).into_response());
    }

    let year = Utc::now().year();
    Ok(page(ProjectFormPage {
        viewer: Viewer::from_state(auth.state()),
        default_year: project.year,
        max_year: year + 1,
        work_types: work_type_options(),
        project: Some(project),
    })?
    .into_response())
}

/// PATCH /dashboard/projects/{id}
pub async fn update_project(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(form): Json<ProjectForm>,
) -> ActionResult {
    let payload = form.validate(Utc::now().year())?;
    auth.client().update_project(id, &payload).await?;
    redirect(format!("/dashboard/projects/{}", id))
}

/// DELETE /dashboard/projects/{id}
pub async fn delete_project(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(confirmation): Json<Confirmation>,
) -> ActionResult {
    confirmation.require()?;
    auth.client().delete_project(id).await?;
    tracing::info!(project = id, "Deleted project");

    if auth.state().is_student() {
        redirect("/dashboard/my-projects")
    } else {
        redirect("/dashboard/projects")
    }
}

/// POST /dashboard/projects/{id}/submit
pub async fn submit_project(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(confirmation): Json<Confirmation>,
) -> ActionResult {
    confirmation.require()?;
    let client = auth.client();
    let project = client.get_project(id).await?;

    let action = submit_action(&project, auth.user());
    if !action.visible {
        return Err(AppError::Validation(
            "Projekt může odevzdat pouze jeho autor ve stavu náčrtu".to_string(),
        ));
    }
    if !action.enabled {
        return Err(AppError::Validation(
            "Před odevzdáním nahrajte dokument projektu".to_string(),
        ));
    }

    client.submit_project(id).await?;
    tracing::info!(project = id, "Submitted project");
    redirect(format!("/dashboard/projects/{}", id))
}

/// POST /dashboard/projects/{id}/teachers
pub async fn assign_teacher(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(form): Json<AssignTeacherForm>,
) -> ActionResult {
    let request = form.validate(id)?;
    let assignment = auth.client().assign_teacher(&request).await?;
    tracing::info!(
        project = id,
        teacher = assignment.teacher,
        role = assignment.role.as_str(),
        "Assigned teacher"
    );
    redirect(format!("/dashboard/projects/{}", id))
}

/// DELETE /dashboard/projects/{id}/teachers/{assignment_id}
pub async fn remove_teacher(
    Extension(auth): Extension<AuthContext>,
    Path((id, assignment_id)): Path<(i64, i64)>,
    Json(confirmation): Json<Confirmation>,
) -> ActionResult {
    confirmation.require()?;
    auth.client().remove_teacher(assignment_id).await?;
    redirect(format!("/dashboard/projects/{}", id))
}

#[derive(Debug, Serialize)]
pub struct TeacherOption {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct StatusGroupView {
    pub status: ProjectStatus,
    pub label: &'static str,
    pub projects: Vec<ProjectCard>,
}

#[derive(Debug, Serialize)]
pub struct MyProjectsPage {
    pub viewer: Viewer,
    pub groups: Vec<StatusGroupView>,
    pub total: usize,
}

/// GET /dashboard/my-projects
pub async fn my_projects_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> PageResult<MyProjectsPage> {
    let user = require_user(auth.state())?;
    let projects = auth
        .client()
        .list_projects(&[("student", user.id.to_string())])
        .await?
        .results;

    let groups = crate::display::group_by_status(&projects)
        .into_iter()
        .map(|group| StatusGroupView {
            status: group.status,
            label: group.label,
            projects: group
                .projects
                .iter()
                .map(|p| project_card(p, Some(user), &state.config.media_url))
                .collect(),
        })
        .collect();

    page(MyProjectsPage {
        viewer: Viewer::from_state(auth.state()),
        groups,
        total: projects.len(),
    })
}

/// Teachers offered by the assignment form.
pub async fn teacher_options(auth: &AuthContext) -> Result<Vec<TeacherOption>, AppError> {
    let teachers = auth.client().list_users(Some(Role::Teacher)).await?;
    Ok(teachers
        .results
        .into_iter()
        .map(|t| TeacherOption {
            id: t.id,
            username: t.username,
        })
        .collect())
}

#[derive(Debug, Serialize)]
pub struct TeacherAssignmentPage {
    pub project_id: i64,
    pub assignments: Vec<AssignmentView>,
    pub teachers: Vec<TeacherOption>,
}

/// GET /dashboard/projects/{id}/teachers
pub async fn teacher_assignment_page(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> PageResult<TeacherAssignmentPage> {
    let assignments = auth
        .client()
        .list_project_teachers(Some(id))
        .await?
        .results
        .into_iter()
        .map(|a| AssignmentView {
            role_label: a.role.label(),
            assignment: a,
        })
        .collect();

    page(TeacherAssignmentPage {
        project_id: id,
        assignments,
        teachers: teacher_options(&auth).await?,
    })
}
