//! Project endpoints, public and authenticated.

use reqwest::Method;

use super::ApiClient;
use crate::errors::AppError;
use crate::models::{Paginated, Project, ProjectFilters, ProjectPayload};

impl ApiClient {
    pub async fn list_public_projects(
        &self,
        filters: &ProjectFilters,
        page: Option<u32>,
    ) -> Result<Paginated<Project>, AppError> {
        self.get_public("/public/projects/", &filters.to_query(page))
            .await
    }

    pub async fn get_public_project(&self, id: i64) -> Result<Project, AppError> {
        self.get_public(&format!("/public/projects/{}/", id), &[])
            .await
    }

    /// Projects the backend scopes to the current user.
    pub async fn list_projects(
        &self,
        query: &[(&'static str, String)],
    ) -> Result<Paginated<Project>, AppError> {
        self.get_query("/projects/", query).await
    }

    /// Projects the current user is allowed to browse.
    pub async fn list_visible_projects(
        &self,
        filters: &ProjectFilters,
        page: Option<u32>,
    ) -> Result<Paginated<Project>, AppError> {
        self.get_query("/visible-projects/", &filters.to_query(page))
            .await
    }

    pub async fn get_project(&self, id: i64) -> Result<Project, AppError> {
        self.get(&format!("/projects/{}/", id)).await
    }

    pub async fn create_project(&self, payload: &ProjectPayload) -> Result<Project, AppError> {
        self.send_json(Method::POST, "/projects/", payload).await
    }

    pub async fn update_project(
        &self,
        id: i64,
        payload: &ProjectPayload,
    ) -> Result<Project, AppError> {
        self.send_json(Method::PATCH, &format!("/projects/{}/", id), payload)
            .await
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/projects/{}/", id)).await
    }

    pub async fn submit_project(&self, id: i64) -> Result<Project, AppError> {
        self.post_empty(&format!("/projects/{}/submit/", id)).await
    }
}
