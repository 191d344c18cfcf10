/// Login session model
///
/// A row in `sessions` is the server-side half of a login: the signed cookie
/// names a session ID, and the session is valid only while its row exists and
/// has not expired. Logging out deletes the row, so a copied cookie stops
/// working immediately.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Server-side session record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// Random session ID (UUID v4, hyphenated)
    pub id: String,

    /// User this session authenticates
    pub user_id: i64,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Starts a new session for `user_id` lasting `ttl`
    pub async fn create(pool: &SqlitePool, user_id: i64, ttl: Duration) -> Result<Self, sqlx::Error> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| sqlx::Error::Protocol(format!("Session lifetime out of range: {}", ttl)))?;

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, user_id, created_at, expires_at
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(now)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;

        Ok(session)
    }

    /// Finds a session that is still valid
    ///
    /// Expired sessions are treated as absent.
    pub async fn find_active(pool: &SqlitePool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, created_at, expires_at FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(session.filter(|s| !s.is_expired()))
    }

    /// Deletes a session (logout)
    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes every expired session, returning how many were purged
    ///
    /// Timestamps are stored as RFC 3339 UTC text, which orders the same as
    /// the instants it encodes.
    pub async fn purge_expired(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
