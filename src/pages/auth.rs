//! Login, registration and logout.

use axum::{extract::Extension, Json};
use serde::Serialize;

use super::{page, redirect, ActionResult, PageResult, Viewer};
use crate::auth::AuthContext;
use crate::forms::{LoginForm, RegisterForm, SELF_REGISTER_ROLES};
use crate::models::Role;

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub viewer: Viewer,
}

#[derive(Debug, Serialize)]
pub struct RoleOption {
    pub value: Role,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RegisterPage {
    pub viewer: Viewer,
    pub roles: Vec<RoleOption>,
}

/// GET /login
pub async fn login_page(Extension(auth): Extension<AuthContext>) -> PageResult<LoginPage> {
    page(LoginPage {
        viewer: Viewer::from_state(auth.state()),
    })
}

/// POST /login
pub async fn login(
    Extension(mut auth): Extension<AuthContext>,
    Json(form): Json<LoginForm>,
) -> ActionResult {
    form.validate()?;
    let next = auth.login(form.username.trim(), &form.password).await?;
    redirect(next)
}

/// GET /register
pub async fn register_page(Extension(auth): Extension<AuthContext>) -> PageResult<RegisterPage> {
    page(RegisterPage {
        viewer: Viewer::from_state(auth.state()),
        roles: SELF_REGISTER_ROLES
            .iter()
            .map(|role| RoleOption {
                value: *role,
                label: role.label(),
            })
            .collect(),
    })
}

/// POST /register
pub async fn register(
    Extension(mut auth): Extension<AuthContext>,
    Json(form): Json<RegisterForm>,
) -> ActionResult {
    let request = form.validate()?;
    let next = auth.register(&request).await?;
    tracing::info!(user = %request.username, role = request.role.as_str(), "Registered user");
    redirect(next)
}

/// POST /logout
pub async fn logout(Extension(mut auth): Extension<AuthContext>) -> ActionResult {
    let next = auth.logout().await?;
    auth.client().session().end().await?;
    redirect(next)
}
