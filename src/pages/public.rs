//! Public landing page, public project list and detail, commenting.

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::Serialize;

use super::projects::{project_card, MediaLinks, ProjectCard, ProjectListQuery};
use super::{accumulate, page, redirect, ActionResult, PageResult, Viewer};
use crate::auth::AuthContext;
use crate::display::{project_status_color, BadgeColor, Listing};
use crate::forms::{CommentForm, Confirmation};
use crate::models::{Comment, ProjectFilters, Role, User};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub viewer: Viewer,
    pub dashboard_path: Option<&'static str>,
}

/// GET /
pub async fn home_page(Extension(auth): Extension<AuthContext>) -> PageResult<HomePage> {
    let viewer = Viewer::from_state(auth.state());
    page(HomePage {
        dashboard_path: viewer.is_authenticated.then_some("/dashboard"),
        viewer,
    })
}

#[derive(Debug, Serialize)]
pub struct PublicListPage {
    pub viewer: Viewer,
    pub filters: ProjectFilters,
    pub listing: Listing<ProjectCard>,
}

/// GET /projects-public
pub async fn public_list_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ProjectListQuery>,
) -> PageResult<PublicListPage> {
    let client = auth.client();
    let filters = query.filters();
    let listing = accumulate(query.page, |page| {
        client.list_public_projects(&filters, Some(page))
    })
    .await?;

    let user = auth.user();
    page(PublicListPage {
        viewer: Viewer::from_state(auth.state()),
        listing: listing.map_items(|p| project_card(&p, user, &state.config.media_url)),
        filters,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub comment: Comment,
    pub author_role_label: &'static str,
    pub can_delete: bool,
}

fn can_delete_comment(comment: &Comment, user: Option<&User>) -> bool {
    user.is_some_and(|u| u.role == Role::Admin || u.id == comment.user)
}

#[derive(Debug, Serialize)]
pub struct PublicDetailPage {
    pub viewer: Viewer,
    pub card: ProjectCard,
    pub description: String,
    pub status_color: BadgeColor,
    pub media: MediaLinks,
    pub comments: Vec<CommentView>,
    pub can_comment: bool,
}

/// GET /projects-public/{id}
pub async fn public_detail_page(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> PageResult<PublicDetailPage> {
    let project = auth.client().get_public_project(id).await?;
    let user = auth.user();
    let media_base = &state.config.media_url;

    let comments = match project.comments.clone() {
        Some(comments) => comments,
        None => match auth.client().list_comments(Some(id)).await {
            Ok(listed) => listed.results,
            Err(e) => {
                tracing::warn!(project = id, "Skipping comments that failed to load: {}", e);
                Vec::new()
            }
        },
    };
    let comments = comments
        .into_iter()
        .map(|comment| CommentView {
            author_role_label: comment.user_role.label(),
            can_delete: can_delete_comment(&comment, user),
            comment,
        })
        .collect();

    page(PublicDetailPage {
        viewer: Viewer::from_state(auth.state()),
        card: project_card(&project, user, media_base),
        description: project.description.clone(),
        status_color: project_status_color(project.status),
        media: MediaLinks::of(&project, media_base),
        comments,
        can_comment: auth.state().is_authenticated(),
    })
}

/// POST /projects-public/{id}/comments
pub async fn create_comment(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(form): Json<CommentForm>,
) -> ActionResult {
    let request = form.validate(id)?;
    auth.client().create_comment(&request).await?;
    redirect(format!("/projects-public/{}", id))
}

/// DELETE /projects-public/{id}/comments/{comment_id}
pub async fn delete_comment(
    Extension(auth): Extension<AuthContext>,
    Path((id, comment_id)): Path<(i64, i64)>,
    Json(confirmation): Json<Confirmation>,
) -> ActionResult {
    confirmation.require()?;
    auth.client().delete_comment(comment_id).await?;
    redirect(format!("/projects-public/{}", id))
}
