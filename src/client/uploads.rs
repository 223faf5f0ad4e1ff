//! Multipart file upload.

use reqwest::{multipart, Method};

use super::{handle_response, ApiClient};
use crate::errors::AppError;
use crate::models::{FileKind, UploadResult};

impl ApiClient {
    /// Forward a file to `/upload/` as the multipart fields `file` and `type`.
    pub async fn upload_file(
        &self,
        kind: FileKind,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<UploadResult, AppError> {
        let build_form = || -> Result<multipart::Form, AppError> {
            let part = multipart::Part::bytes(bytes.to_vec())
                .file_name(file_name.to_string())
                .mime_str(content_type)
                .map_err(|e| AppError::BadRequest(format!("Invalid content type: {}", e)))?;
            Ok(multipart::Form::new()
                .part("file", part)
                .text("type", kind.as_str()))
        };

        let response = self
            .send_with_auth(|| Ok(self.request(Method::POST, "/upload/").multipart(build_form()?)))
            .await?;
        handle_response(response).await
    }
}
