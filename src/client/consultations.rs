use reqwest::Method;

use super::milestones::project_query;
use super::ApiClient;
use crate::errors::AppError;
use crate::models::{Consultation, ConsultationPayload, Paginated};

impl ApiClient {
    pub async fn list_consultations(
        &self,
        project: Option<i64>,
    ) -> Result<Paginated<Consultation>, AppError> {
        self.get_query("/consultations/", &project_query(project))
            .await
    }

    pub async fn create_consultation(
        &self,
        payload: &ConsultationPayload,
    ) -> Result<Consultation, AppError> {
        self.send_json(Method::POST, "/consultations/", payload).await
    }

    pub async fn update_consultation(
        &self,
        id: i64,
        payload: &ConsultationPayload,
    ) -> Result<Consultation, AppError> {
        self.send_json(Method::PATCH, &format!("/consultations/{}/", id), payload)
            .await
    }

    pub async fn delete_consultation(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/consultations/{}/", id)).await
    }
}
