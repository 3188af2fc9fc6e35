use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::db_error;
use crate::crypto::{generate_token_default, hash_token};
use crate::{AccessToken, IssuedToken, SecretString, TeamError, TokenRepository};

#[derive(Clone)]
pub struct SqliteTokenRepository {
    pool: SqlitePool,
}

impl SqliteTokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Deletes expired tokens and returns how many were removed.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn prune_expired(&self) -> Result<u64, TeamError> {
        let result = sqlx::query("DELETE FROM access_tokens WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(db_error("prune_expired_tokens"))?;

        Ok(result.rows_affected())
    }
}

#[derive(FromRow)]
struct TokenRecord {
    token_hash: String,
    user_id: i64,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<TokenRecord> for AccessToken {
    fn from(row: TokenRecord) -> Self {
        AccessToken {
            token_hash: row.token_hash,
            user_id: row.user_id,
            expires_at: row.expires_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl TokenRepository for SqliteTokenRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn create_token(
        &self,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TeamError> {
        let plain_token = generate_token_default();

        let row: TokenRecord = sqlx::query_as(
            r"INSERT INTO access_tokens (token_hash, user_id, expires_at, created_at)
               VALUES (?, ?, ?, ?)
               RETURNING token_hash, user_id, expires_at, created_at",
        )
        .bind(hash_token(&plain_token))
        .bind(user_id)
        .bind(expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("create_token"))?;

        Ok(IssuedToken {
            token: SecretString::new(plain_token),
            access_token: row.into(),
        })
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, token), err))]
    async fn find_token(&self, token: &str) -> Result<Option<AccessToken>, TeamError> {
        let row: Option<TokenRecord> = sqlx::query_as(
            r"SELECT token_hash, user_id, expires_at, created_at
               FROM access_tokens WHERE token_hash = ?",
        )
        .bind(hash_token(token))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find_token"))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, token), err))]
    async fn revoke_token(&self, token: &str) -> Result<(), TeamError> {
        sqlx::query("DELETE FROM access_tokens WHERE token_hash = ?")
            .bind(hash_token(token))
            .execute(&self.pool)
            .await
            .map_err(db_error("revoke_token"))?;

        Ok(())
    }
}
