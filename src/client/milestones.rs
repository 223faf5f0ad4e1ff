use reqwest::Method;

use super::ApiClient;
use crate::errors::AppError;
use crate::models::{CompletionUpdate, Milestone, MilestonePayload, Paginated};

impl ApiClient {
    pub async fn list_milestones(&self, project: Option<i64>) -> Result<Paginated<Milestone>, AppError> {
        self.get_query("/milestones/", &project_query(project)).await
    }

    pub async fn get_milestone(&self, id: i64) -> Result<Milestone, AppError> {
        self.get(&format!("/milestones/{}/", id)).await
    }

    pub async fn create_milestone(&self, payload: &MilestonePayload) -> Result<Milestone, AppError> {
        self.send_json(Method::POST, "/milestones/", payload).await
    }

    pub async fn update_milestone(
        &self,
        id: i64,
        payload: &MilestonePayload,
    ) -> Result<Milestone, AppError> {
        self.send_json(Method::PATCH, &format!("/milestones/{}/", id), payload)
            .await
    }

    pub async fn update_completion(&self, id: i64, completion: i64) -> Result<Milestone, AppError> {
        self.send_json(
            Method::POST,
            &format!("/milestones/{}/update_completion/", id),
            &CompletionUpdate { completion },
        )
        .await
    }

    pub async fn delete_milestone(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/milestones/{}/", id)).await
    }
}

/// `?project=<id>` when a project is given.
pub(super) fn project_query(project: Option<i64>) -> Vec<(&'static str, String)> {
    project
        .map(|id| vec![("project", id.to_string())])
        .unwrap_or_default()
}
