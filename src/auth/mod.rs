//! Authentication state of the current visitor.
//!
//! Resolved once per request by the session middleware and handed to the
//! handlers; the login, register and logout actions update it and return
//! where the browser should go next.

use crate::client::ApiClient;
use crate::errors::AppError;
use crate::models::{RegisterRequest, Role, User};

/// Who the visitor is.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Not resolved yet
    Loading,
    Authenticated(User),
    Anonymous,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn is_student(&self) -> bool {
        self.role() == Some(Role::Student)
    }

    pub fn is_teacher(&self) -> bool {
        self.role() == Some(Role::Teacher)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }
}

/// Navigation target after a successful login or registration.
pub const AFTER_LOGIN: &str = "/dashboard";
/// Navigation target after logout.
pub const AFTER_LOGOUT: &str = "/";

/// Auth state together with the client used to change it.
#[derive(Clone)]
pub struct AuthContext {
    client: ApiClient,
    state: AuthState,
}

impl AuthContext {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: AuthState::Loading,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user()
    }

    /// Ask the backend who the session belongs to. Any failure drops the
    /// session's tokens and leaves the visitor anonymous.
    pub async fn resolve(&mut self) -> &AuthState {
        self.state = match self.client.current_user().await {
            Ok(Some(user)) => AuthState::Authenticated(user),
            Ok(None) => AuthState::Anonymous,
            Err(e) => {
                tracing::warn!("Failed to load current user: {}", e);
                if let Err(e) = self.client.logout().await {
                    tracing::error!("Failed to clear session tokens: {}", e);
                }
                AuthState::Anonymous
            }
        };
        &self.state
    }

    /// Sign in; the backend's error message is passed through on failure.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&'static str, AppError> {
        self.client.login(username, password).await?;

        match self.client.current_user().await {
            Ok(Some(user)) => {
                tracing::info!(user = %user.username, "User signed in");
                self.state = AuthState::Authenticated(user);
                Ok(AFTER_LOGIN)
            }
            Ok(None) => {
                self.state = AuthState::Anonymous;
                Err(AppError::Unauthorized("Přihlášení se nezdařilo".to_string()))
            }
            Err(e) => {
                self.client.logout().await?;
                self.state = AuthState::Anonymous;
                Err(e)
            }
        }
    }

    /// Create the account, then sign in with the same credentials.
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<&'static str, AppError> {
        self.client.register(request).await?;
        self.login(&request.username, &request.password).await
    }

    pub async fn logout(&mut self) -> Result<&'static str, AppError> {
        self.client.logout().await?;
        self.state = AuthState::Anonymous;
        Ok(AFTER_LOGOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: 1,
            username: "jana".to_string(),
            email: "jana@example.com".to_string(),
            role,
            date_joined: None,
        }
    }

    #[test]
    fn test_role_flags() {
        let state = AuthState::Authenticated(user(Role::Teacher));
        assert!(state.is_authenticated());
        assert!(state.is_teacher());
        assert!(!state.is_student());
        assert!(!state.is_admin());
    }

    #[test]
    fn test_loading_and_anonymous_have_no_flags() {
        for state in [AuthState::Loading, AuthState::Anonymous] {
            assert!(!state.is_authenticated());
            assert!(!state.is_admin());
            assert_eq!(state.role(), None);
        }
    }

    #[test]
    fn test_unknown_role_is_authenticated_without_role_flags() {
        let state = AuthState::Authenticated(user(Role::Unknown));
        assert!(state.is_authenticated());
        assert!(!state.is_student() && !state.is_teacher() && !state.is_admin());
    }
}
