use reqwest::Method;

use super::milestones::project_query;
use super::ApiClient;
use crate::errors::AppError;
use crate::models::{EvaluationPayload, Paginated, ProjectEvaluation};

impl ApiClient {
    pub async fn list_evaluations(
        &self,
        project: Option<i64>,
    ) -> Result<Paginated<ProjectEvaluation>, AppError> {
        self.get_query("/evaluations/", &project_query(project)).await
    }

    pub async fn create_evaluation(
        &self,
        payload: &EvaluationPayload,
    ) -> Result<ProjectEvaluation, AppError> {
        self.send_json(Method::POST, "/evaluations/", payload).await
    }

    pub async fn update_evaluation(
        &self,
        id: i64,
        payload: &EvaluationPayload,
    ) -> Result<ProjectEvaluation, AppError> {
        self.send_json(Method::PATCH, &format!("/evaluations/{}/", id), payload)
            .await
    }

    pub async fn delete_evaluation(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/evaluations/{}/", id)).await
    }
}
