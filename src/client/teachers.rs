//! Teacher assignment endpoints.

use reqwest::Method;

use super::milestones::project_query;
use super::ApiClient;
use crate::errors::AppError;
use crate::models::{AssignTeacherRequest, Paginated, ProjectTeacher};

impl ApiClient {
    pub async fn list_project_teachers(
        &self,
        project: Option<i64>,
    ) -> Result<Paginated<ProjectTeacher>, AppError> {
        self.get_query("/project-teachers/", &project_query(project))
            .await
    }

    pub async fn assign_teacher(
        &self,
        request: &AssignTeacherRequest,
    ) -> Result<ProjectTeacher, AppError> {
        self.send_json(Method::POST, "/project-teachers/", request)
            .await
    }

    pub async fn accept_assignment(&self, id: i64) -> Result<ProjectTeacher, AppError> {
        self.post_empty(&format!("/project-teachers/{}/accept/", id))
            .await
    }

    /// The backend answers a decline with `{"detail": ...}` only.
    pub async fn decline_assignment(&self, id: i64) -> Result<(), AppError> {
        let _: serde_json::Value = self
            .post_empty(&format!("/project-teachers/{}/decline/", id))
            .await?;
        Ok(())
    }

    pub async fn remove_teacher(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/project-teachers/{}/", id)).await
    }
}
