//! File upload forwarding.

use axum::extract::{multipart::MultipartError, Extension, Multipart};

use super::{page, PageResult};
use crate::auth::AuthContext;
use crate::errors::AppError;
use crate::forms::validate_upload;
use crate::models::UploadResult;

fn multipart_error(err: MultipartError) -> AppError {
    tracing::warn!("Malformed upload: {}", err);
    AppError::BadRequest(format!("Malformed upload: {}", err))
}

struct UploadedFile {
    name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// POST /dashboard/upload
///
/// Expects the multipart fields `file` and `type`; answers with the stored
/// path and URL so the project form can reference them.
pub async fn upload(
    Extension(auth): Extension<AuthContext>,
    mut multipart: Multipart,
) -> PageResult<UploadResult> {
    let mut file = None;
    let mut kind = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some(UploadedFile {
                    name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            Some("type") => kind = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("Vyberte soubor".to_string()))?;
    let kind = kind.ok_or_else(|| AppError::Validation("Chybí typ souboru".to_string()))?;
    let kind = validate_upload(kind.trim(), &file.content_type, file.bytes.len())?;

    tracing::debug!(file = %file.name, kind = kind.as_str(), size = file.bytes.len(), "Forwarding upload");
    let result = auth
        .client()
        .upload_file(kind, &file.name, &file.content_type, &file.bytes)
        .await?;
    page(result)
}
