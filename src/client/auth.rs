//! Token and account endpoints.

use reqwest::Method;

use super::{handle_response, ApiClient};
use crate::errors::AppError;
use crate::models::{LoginCredentials, RegisterRequest, TokenPair, User};

impl ApiClient {
    /// Exchange credentials for a token pair and store it under a fresh
    /// session id.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AppError> {
        let credentials = LoginCredentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .request(Method::POST, "/auth/token/")
            .json(&credentials)
            .send()
            .await?;
        let tokens: TokenPair = handle_response(response).await?;

        self.session.renew().await?;
        self.session
            .set_tokens(tokens.access.clone(), Some(tokens.refresh.clone()))
            .await?;
        Ok(tokens)
    }

    /// Create an account without authenticating.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, AppError> {
        let response = self
            .request(Method::POST, "/users/")
            .json(request)
            .send()
            .await?;
        handle_response(response).await
    }

    /// The signed-in user, or `None` without asking the backend when the
    /// session holds no access token.
    pub async fn current_user(&self) -> Result<Option<User>, AppError> {
        if self.session.access_token().await.is_none() {
            return Ok(None);
        }
        self.get("/users/me/").await.map(Some)
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.clear_tokens().await
    }
}
