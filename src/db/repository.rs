//! Session repository.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::AppError;

/// Token pair persisted for one session. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredTokens {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

/// Repository over the `sessions` table.
#[derive(Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

/// Fixed-width UTC timestamp, so stored values order as text.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a session under `id` with its first token pair.
    pub async fn insert_session(&self, id: Uuid, tokens: &StoredTokens) -> Result<(), AppError> {
        let now = timestamp(Utc::now());

        sqlx::query(
            "INSERT INTO sessions (id, access_token, refresh_token, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&tokens.access)
        .bind(&tokens.refresh)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::debug!(session = %id, "Created session");
        Ok(())
    }

    /// Load the tokens of a session; `None` when the session does not exist.
    pub async fn load_tokens(&self, id: Uuid) -> Result<Option<StoredTokens>, AppError> {
        let row = sqlx::query("SELECT access_token, refresh_token FROM sessions WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| StoredTokens {
            access: row.get("access_token"),
            refresh: row.get("refresh_token"),
        }))
    }

    /// Overwrite both tokens.
    pub async fn store_tokens(&self, id: Uuid, tokens: &StoredTokens) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE sessions SET access_token = ?, refresh_token = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&tokens.access)
        .bind(&tokens.refresh)
        .bind(timestamp(Utc::now()))
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Session {} not found", id)));
        }
        Ok(())
    }

    /// Remove both tokens, keeping the session row.
    pub async fn clear_tokens(&self, id: Uuid) -> Result<(), AppError> {
        self.store_tokens(id, &StoredTokens::default()).await
    }

    /// Delete a session entirely.
    pub async fn delete_session(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every session last written before `cutoff`. Returns how many went.
    pub async fn purge_idle(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE updated_at < ?")
            .bind(timestamp(cutoff))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    #[cfg(test)]
    pub async fn count(&self) -> i64 {
        sqlx::query("SELECT COUNT(*) AS n FROM sessions")
            .fetch_one(&self.pool)
            .await
            .unwrap()
            .get("n")
    }
}
