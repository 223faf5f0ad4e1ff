use axum::extract::Extension;
use serde::Serialize;

use super::{page, require_user, PageResult};
use crate::auth::AuthContext;
use crate::models::User;

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub user: User,
    pub role_label: &'static str,
}

/// GET /profile
pub async fn profile_page(Extension(auth): Extension<AuthContext>) -> PageResult<ProfilePage> {
    let user = require_user(auth.state())?.clone();
    page(ProfilePage {
        role_label: user.role.label(),
        user,
    })
}
