//! Typed client for the backend REST API.
//!
//! Built per request around the visitor's [`Session`]. Every authenticated
//! call carries `Authorization: Bearer <access>`; a 401 answer triggers one
//! refresh-token exchange followed by one retry, and nothing more.

mod auth;
mod comments;
mod consultations;
mod evaluations;
mod milestones;
mod projects;
mod teachers;
mod uploads;
mod users;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::instrument;

use crate::errors::AppError;
use crate::models::RefreshedToken;
use crate::session::Session;

/// Backend client bound to one visitor session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: &str, session: Session) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Send a request with the bearer token, refreshing once on 401.
    ///
    /// `build` is called again for the retry since request bodies such as
    /// multipart forms cannot be cloned.
    async fn send_with_auth<F>(&self, build: F) -> Result<Response, AppError>
    where
        F: Fn() -> Result<RequestBuilder, AppError>,
    {
        let response = self.authorize(build()?).await.send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        if self.refresh_access_token().await {
            return Ok(self.authorize(build()?).await.send().await?);
        }

        Ok(response)
    }

    async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.access_token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Exchange the refresh token for a new access token.
    #[instrument(skip(self))]
    async fn refresh_access_token(&self) -> bool {
        let Some(refresh) = self.session.refresh_token().await else {
            return false;
        };

        tracing::debug!("Access token rejected, refreshing");
        let response = match self
            .request(Method::POST, "/auth/token/refresh/")
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Token refresh failed: {}", e);
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Token refresh rejected with {}", response.status());
            return false;
        }

        let refreshed = match response.json::<RefreshedToken>().await {
            Ok(refreshed) => refreshed,
            Err(e) => {
                tracing::warn!("Token refresh answer unreadable: {}", e);
                return false;
            }
        };

        match self.session.set_tokens(refreshed.access, Some(refresh)).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to store refreshed token: {}", e);
                false
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self
            .send_with_auth(|| Ok(self.request(Method::GET, path)))
            .await?;
        handle_response(response).await
    }

    async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .send_with_auth(|| Ok(self.request(Method::GET, path).query(query)))
            .await?;
        handle_response(response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send_with_auth(|| Ok(self.request(method.clone(), path).json(body)))
            .await?;
        handle_response(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self
            .send_with_auth(|| Ok(self.request(Method::POST, path)))
            .await?;
        handle_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        let response = self
            .send_with_auth(|| Ok(self.request(Method::DELETE, path)))
            .await?;
        handle_empty(response).await
    }

    /// Unauthenticated GET for the public endpoints.
    async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, AppError> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        handle_response(response).await
    }
}

/// Parse a 2xx answer, or turn anything else into [`AppError::Api`].
pub async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response.json::<T>().await?)
}

/// Like [`handle_response`] for endpoints whose success carries no body.
pub async fn handle_empty(response: Response) -> Result<(), AppError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(())
}

async fn api_error(response: Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    AppError::Api {
        status: status.as_u16(),
        message: error_message(status, &body),
    }
}

/// The backend's `detail`, else its JSON body, else `"<status>: <reason>"`.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail").and_then(|d| d.as_str()) {
            Some(detail) => detail.to_string(),
            None => value.to_string(),
        },
        Err(_) => format!(
            "{}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ),
    }
}
