use reqwest::Method;

use super::ApiClient;
use crate::errors::AppError;
use crate::models::{Paginated, Role, UpdateUserRequest, User};

impl ApiClient {
    pub async fn list_users(&self, role: Option<Role>) -> Result<Paginated<User>, AppError> {
        let query: Vec<(&'static str, String)> = role
            .map(|r| vec![("role", r.as_str().to_string())])
            .unwrap_or_default();
        self.get_query("/users/", &query).await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.get(&format!("/users/{}/", id)).await
    }

    pub async fn update_user(&self, id: i64, request: &UpdateUserRequest) -> Result<User, AppError> {
        self.send_json(Method::PATCH, &format!("/users/{}/", id), request)
            .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/users/{}/", id)).await
    }
}
