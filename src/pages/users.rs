//! User administration.

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{blank_variant_as_none, page, redirect, ActionResult, PageResult, RoleOption, Viewer};
use crate::auth::AuthContext;
use crate::display::BadgeColor;
use crate::forms::{Confirmation, CreateUserForm, EditUserForm};
use crate::models::{Role, User};

const USERS_PATH: &str = "/dashboard/users";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilterQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "blank_variant_as_none")]
    pub role: Option<Role>,
}

impl UserFilterQuery {
    /// Case-insensitive match on username or email, then the role.
    fn matches(&self, user: &User) -> bool {
        let term = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);
        let by_term = term.map_or(true, |term| {
            user.username.to_lowercase().contains(&term) || user.email.to_lowercase().contains(&term)
        });
        by_term && self.role.map_or(true, |role| user.role == role)
    }

    fn is_filtered(&self) -> bool {
        self.role.is_some() || self.search.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

fn role_color(role: Role) -> BadgeColor {
    match role {
        Role::Student => BadgeColor::Blue,
        Role::Teacher => BadgeColor::Green,
        Role::Admin => BadgeColor::Red,
        Role::Unknown => BadgeColor::Gray,
    }
}

#[derive(Debug, Serialize)]
pub struct UserRow {
    pub user: User,
    pub role_label: &'static str,
    pub role_color: BadgeColor,
    pub is_self: bool,
}

#[derive(Debug, Serialize)]
pub struct UserManagementPage {
    pub viewer: Viewer,
    pub users: Vec<UserRow>,
    pub total: usize,
    pub is_filtered: bool,
    pub roles: Vec<RoleOption>,
}

/// GET /dashboard/users
pub async fn user_management_page(
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<UserFilterQuery>,
) -> PageResult<UserManagementPage> {
    let users = auth.client().list_users(None).await?.results;
    let total = users.len();
    let me = auth.user().map(|u| u.id);

    page(UserManagementPage {
        viewer: Viewer::from_state(auth.state()),
        users: users
            .into_iter()
            .filter(|u| query.matches(u))
            .map(|user| UserRow {
                role_label: user.role.label(),
                role_color: role_color(user.role),
                is_self: Some(user.id) == me,
                user,
            })
            .collect(),
        total,
        is_filtered: query.is_filtered(),
        roles: role_options(),
    })
}

#[derive(Debug, Serialize)]
pub struct UserEditPage {
    pub viewer: Viewer,
    pub user: User,
    pub roles: Vec<RoleOption>,
}

fn role_options() -> Vec<RoleOption> {
    [Role::Student, Role::Teacher, Role::Admin]
        .into_iter()
        .map(|role| RoleOption {
            value: role,
            label: role.label(),
        })
        .collect()
}

/// GET /dashboard/users/{id}
pub async fn edit_user_page(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> PageResult<UserEditPage> {
    let user = auth.client().get_user(id).await?;
    page(UserEditPage {
        viewer: Viewer::from_state(auth.state()),
        user,
        roles: role_options(),
    })
}

/// POST /dashboard/users
pub async fn create_user(
    Extension(auth): Extension<AuthContext>,
    Json(form): Json<CreateUserForm>,
) -> ActionResult {
    let request = form.validate()?;
    let user = auth.client().register(&request).await?;
    tracing::info!(user = user.id, role = user.role.as_str(), "Created user");
    redirect(USERS_PATH)
}

/// PATCH /dashboard/users/{id}
pub async fn update_user(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(form): Json<EditUserForm>,
) -> ActionResult {
    let request = form.validate()?;
    auth.client().update_user(id, &request).await?;
    redirect(USERS_PATH)
}

/// DELETE /dashboard/users/{id}
pub async fn delete_user(
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(confirmation): Json<Confirmation>,
) -> ActionResult {
    confirmation.require()?;
    auth.client().delete_user(id).await?;
    tracing::info!(user = id, "Deleted user");
    redirect(USERS_PATH)
}
