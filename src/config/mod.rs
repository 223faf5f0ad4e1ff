//! Configuration module for the student projects web frontend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::display::Locale;
use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend REST API
    pub api_url: String,
    /// Base URL used to turn stored file paths into absolute links
    pub media_url: String,
    /// Path to the SQLite file holding visitor sessions
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Language of derived display messages
    pub locale: Locale,
    /// Whether the session cookie is marked `Secure`
    pub secure_cookies: bool,
    /// Sessions not written to for this long are deleted
    pub session_idle_days: i64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("SPW_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        let media_url = env::var("SPW_MEDIA_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| api_url.clone());

        let db_path = env::var("SPW_DB_PATH")
            .unwrap_or_else(|_| "./data/sessions.sqlite".to_string())
            .into();

        let bind_addr = env::var("SPW_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid SPW_BIND_ADDR format: {}", e)))?;

        let log_level = env::var("SPW_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let locale = match env::var("SPW_LOCALE") {
            Ok(value) => Locale::from_str(&value)
                .ok_or_else(|| AppError::Internal(format!("Unsupported SPW_LOCALE: {}", value)))?,
            Err(_) => Locale::Cs,
        };

        let secure_cookies = env::var("SPW_SECURE_COOKIES")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let session_idle_days = match env::var("SPW_SESSION_IDLE_DAYS") {
            Ok(value) => value
                .parse()
                .ok()
                .filter(|days: &i64| *days > 0)
                .ok_or_else(|| {
                    AppError::Internal(format!("Invalid SPW_SESSION_IDLE_DAYS: {}", value))
                })?,
            Err(_) => 14,
        };

        Ok(Self {
            api_url,
            media_url,
            db_path,
            bind_addr,
            log_level,
            locale,
            secure_cookies,
            session_idle_days,
        })
    }
}
