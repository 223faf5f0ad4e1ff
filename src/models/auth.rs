//! Authentication and upload payloads.

use serde::{Deserialize, Serialize};

use super::Role;

/// Access/refresh token pair issued by `/auth/token/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Body of `/auth/token/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /users/` used for self-registration and admin user creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub role: Role,
}

/// Answer of `/auth/token/refresh/`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedToken {
    pub access: String,
}

/// Kind of file attached to a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Thumbnail,
    Document,
    Poster,
    Video,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Thumbnail => "thumbnail",
            FileKind::Document => "document",
            FileKind::Poster => "poster",
            FileKind::Video => "video",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "thumbnail" => Some(FileKind::Thumbnail),
            "document" => Some(FileKind::Document),
            "poster" => Some(FileKind::Poster),
            "video" => Some(FileKind::Video),
            _ => None,
        }
    }

    /// Content types the upload form accepts for this kind.
    pub fn accepted_types(&self) -> &'static [&'static str] {
        match self {
            FileKind::Thumbnail => &["image/jpeg", "image/png", "image/gif"],
            FileKind::Document => &[
                "application/pdf",
                "application/msword",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ],
            FileKind::Poster => &["image/jpeg", "image/png", "application/pdf"],
            FileKind::Video => &["video/mp4", "video/webm", "video/ogg"],
        }
    }
}

/// Answer of `/upload/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResult {
    pub file_path: String,
    pub url: String,
}
