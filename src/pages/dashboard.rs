//! Landing page of signed-in users.

use axum::extract::{Extension, State};
use chrono::Utc;
use serde::Serialize;

use super::projects::{project_card, ProjectCard};
use super::{page, PageResult, Viewer};
use crate::auth::AuthContext;
use crate::display::{
    days_message, milestone_display, upcoming_consultations, upcoming_milestones,
    MilestoneDisplay, UPCOMING_LIMIT,
};
use crate::models::{Consultation, Milestone};
use crate::AppState;

/// Projects listed under "recent projects".
const RECENT_PROJECTS: usize = 5;

#[derive(Debug, Serialize)]
pub struct UpcomingMilestone {
    pub milestone: Milestone,
    pub display: MilestoneDisplay,
    pub days_message: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub viewer: Viewer,
    pub recent_projects: Vec<ProjectCard>,
    pub upcoming_milestones: Vec<UpcomingMilestone>,
    /// Only filled for students and teachers
    pub upcoming_consultations: Option<Vec<Consultation>>,
}

/// GET /dashboard
pub async fn dashboard_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> PageResult<DashboardPage> {
    let client = auth.client();
    let user = auth.user();
    let now = Utc::now();
    let locale = state.config.locale;

    let recent_projects = client
        .list_projects(&[("limit", RECENT_PROJECTS.to_string())])
        .await?
        .results
        .iter()
        .take(RECENT_PROJECTS)
        .map(|p| project_card(p, user, &state.config.media_url))
        .collect();

    let milestones = client.list_milestones(None).await?.results;
    let upcoming_milestones = upcoming_milestones(&milestones, now)
        .into_iter()
        .map(|m| UpcomingMilestone {
            display: milestone_display(&m, now, locale),
            days_message: days_message(m.deadline, now, locale),
            milestone: m,
        })
        .collect();

    let upcoming_consultations = if auth.state().is_student() || auth.state().is_teacher() {
        let consultations = client.list_consultations(None).await?.results;
        Some(upcoming_consultations(&consultations, now, UPCOMING_LIMIT))
    } else {
        None
    };

    page(DashboardPage {
        viewer: Viewer::from_state(auth.state()),
        recent_projects,
        upcoming_milestones,
        upcoming_consultations,
    })
}
