use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::TeamError;
use crate::sqlite::db_error;
use crate::teams::{CreateInvitation, Invitation, InvitationRepository};

#[derive(Clone)]
pub struct SqliteInvitationRepository {
    pool: SqlitePool,
}

impl SqliteInvitationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct InvitationRecord {
    id: i64,
    team_id: i64,
    email: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<InvitationRecord> for Invitation {
    fn from(row: InvitationRecord) -> Self {
        Invitation {
            id: row.id,
            team_id: row.team_id,
            email: row.email,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

#[async_trait]
impl InvitationRepository for SqliteInvitationRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, data), err))]
    async fn upsert(&self, data: CreateInvitation) -> Result<Invitation, TeamError> {
        let row: InvitationRecord = sqlx::query_as(
            r"
            INSERT INTO invitations (team_id, email, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (team_id, email)
            DO UPDATE SET created_at = excluded.created_at, expires_at = excluded.expires_at
            RETURNING id, team_id, email, created_at, expires_at
            ",
        )
        .bind(data.team_id)
        .bind(&data.email)
        .bind(Utc::now())
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("upsert_invitation"))?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_pending_by_team(&self, team_id: i64) -> Result<Vec<Invitation>, TeamError> {
        let rows: Vec<InvitationRecord> = sqlx::query_as(
            r"
            SELECT id, team_id, email, created_at, expires_at
            FROM invitations
            WHERE team_id = ? AND expires_at > ?
            ORDER BY created_at, id
            ",
        )
        .bind(team_id)
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("find_pending_invitations"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn delete_expired(&self) -> Result<u64, TeamError> {
        let result = sqlx::query("DELETE FROM invitations WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete_expired_invitations"))?;

        Ok(result.rows_affected())
    }
}
