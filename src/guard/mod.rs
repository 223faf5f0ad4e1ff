//! Route-level authorization.
//!
//! Each route group carries a [`Policy`]; [`decide`] maps the policy and the
//! visitor's [`AuthState`] to what should happen, and [`guard_layer`] applies
//! that decision in front of the handlers.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};

use crate::auth::{AuthContext, AuthState};
use crate::models::Role;

/// Where anonymous visitors are sent.
pub const LOGIN_PATH: &str = "/login";
/// Where visitors with the wrong role are sent.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Who may reach a route group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    Public,
    Authenticated,
    Roles(&'static [Role]),
}

/// Outcome of a policy check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Auth not resolved yet; show the loading placeholder
    Pending,
    Allow,
    Redirect(&'static str),
}

/// Never redirects while the auth state is still loading.
pub fn decide(policy: &Policy, state: &AuthState) -> Decision {
    if *policy == Policy::Public {
        return Decision::Allow;
    }

    let user = match state {
        AuthState::Loading => return Decision::Pending,
        AuthState::Anonymous => return Decision::Redirect(LOGIN_PATH),
        AuthState::Authenticated(user) => user,
    };

    match policy {
        Policy::Roles(roles) if !roles.contains(&user.role) => Decision::Redirect(DASHBOARD_PATH),
        _ => Decision::Allow,
    }
}

/// Middleware enforcing `policy` on a route group.
pub async fn guard_layer(policy: Policy, request: Request, next: Next) -> Response {
    let state = request
        .extensions()
        .get::<AuthContext>()
        .map(|ctx| ctx.state().clone())
        .unwrap_or(AuthState::Loading);

    match decide(&policy, &state) {
        Decision::Allow => next.run(request).await,
        Decision::Redirect(path) => {
            tracing::debug!(path = %request.uri().path(), to = path, "Guard redirect");
            Redirect::to(path).into_response()
        }
        Decision::Pending => loading_placeholder(),
    }
}

fn loading_placeholder() -> Response {
    (
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "success": true, "data": { "loading": true } })),
    )
        .into_response()
}
