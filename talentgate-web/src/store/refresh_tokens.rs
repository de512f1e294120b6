//! Refresh token records
//!
//! Rows are keyed by the SHA-256 hex digest of the token, never the token
//! itself. Revocation is a single-row update and monotonic: once revoked or
//! expired a row never yields a new access token again.

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use talentgate_core::UserId;
use tracing::{debug, error};

/// Persisted refresh token state
#[derive(Debug, sqlx::FromRow)]
pub struct RefreshTokenRecord {
    pub token_hash: String,
    pub user_id: i64,
    pub expires_at: String,
    pub revoked: bool,
}

impl RefreshTokenRecord {
    /// Whether this record may still mint access tokens
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        if self.revoked {
            return false;
        }
        self.expires_at
            .parse::<DateTime<Utc>>()
            .map(|expires_at| expires_at > now)
            .unwrap_or(false)
    }
}

/// Database-backed refresh token store
#[derive(Debug, Clone)]
pub struct RefreshTokenStore {
    pool: SqlitePool,
}

impl RefreshTokenStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the refresh_tokens table
    pub async fn create_tables(&self) -> Result<(), ApiError> {
        let query = r#"
            CREATE TABLE IF NOT EXISTS refresh_tokens (
                token_hash TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL,
                expires_at TEXT NOT NULL,
                revoked INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_refresh_tokens_user ON refresh_tokens(user_id);
        "#;

        sqlx::query(query).execute(&self.pool).await.map_err(|e| {
            error!("Failed to create refresh_tokens table: {}", e);
            ApiError::Database(e.to_string())
        })?;

        Ok(())
    }

    /// Persist a record for a freshly minted refresh token
    pub async fn insert(
        &self,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO refresh_tokens (token_hash, user_id, expires_at, revoked) VALUES (?, ?, ?, 0)",
        )
        .bind(hash_token(token))
        .bind(user_id)
        .bind(expires_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to insert refresh token: {}", e);
            ApiError::Database(e.to_string())
        })?;

        Ok(())
    }

    /// Point lookup by the presented token
    pub async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, ApiError> {
        sqlx::query_as::<_, RefreshTokenRecord>(
            "SELECT * FROM refresh_tokens WHERE token_hash = ?",
        )
        .bind(hash_token(token))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to query refresh token: {}", e);
            ApiError::Database(e.to_string())
        })
    }

    /// Revoke a single token (idempotent single-row update)
    pub async fn revoke(&self, token: &str) -> Result<(), ApiError> {
        sqlx::query("UPDATE refresh_tokens SET revoked = 1 WHERE token_hash = ?")
            .bind(hash_token(token))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to revoke refresh token: {}", e);
                ApiError::Database(e.to_string())
            })?;

        Ok(())
    }

    /// Revoke every session belonging to a user
    pub async fn revoke_all_for_user(&self, user_id: UserId) -> Result<u64, ApiError> {
        let result = sqlx::query("UPDATE refresh_tokens SET revoked = 1 WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to revoke user sessions: {}", e);
                ApiError::Database(e.to_string())
            })?;

        Ok(result.rows_affected())
    }

    /// Delete rows past their expiry; revocation state for live rows is kept
    pub async fn purge_expired(&self) -> Result<u64, ApiError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < ?")
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to purge expired refresh tokens: {}", e);
                ApiError::Database(e.to_string())
            })?;

        let purged = result.rows_affected();
        if purged > 0 {
            debug!("Purged {} expired refresh token rows", purged);
        }
        Ok(purged)
    }
}

/// SHA-256 hex digest of a token string
fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
