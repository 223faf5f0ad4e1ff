use reqwest::Method;

use super::milestones::project_query;
use super::ApiClient;
use crate::errors::AppError;
use crate::models::{Comment, CreateCommentRequest, Paginated};

impl ApiClient {
    pub async fn list_comments(&self, project: Option<i64>) -> Result<Paginated<Comment>, AppError> {
        self.get_query("/comments/", &project_query(project)).await
    }

    pub async fn create_comment(&self, request: &CreateCommentRequest) -> Result<Comment, AppError> {
        self.send_json(Method::POST, "/comments/", request).await
    }

    pub async fn delete_comment(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/comments/{}/", id)).await
    }
}
