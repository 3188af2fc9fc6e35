//! `SQLite` implementation of [`TeamRepository`].
//!
//! Member sets live in `team_members`, keyed by `(team_id, user_id)`;
//! insertion order is the table's rowid order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use crate::TeamError;
use crate::sqlite::{db_error, is_unique_violation};
use crate::teams::{CreateTeam, Team, TeamRepository, UpdateTeam};

const TEAM_COLUMNS: &str = "id, team_leader_id, name, slug, avatar_url, is_default_team, created_at";

#[derive(Clone)]
pub struct SqliteTeamRepository {
    pool: SqlitePool,
}

impl SqliteTeamRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn member_ids(&self, team_id: i64) -> Result<Vec<i64>, TeamError> {
        sqlx::query_scalar("SELECT user_id FROM team_members WHERE team_id = ? ORDER BY rowid")
            .bind(team_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("team_member_ids"))
    }

    async fn with_members(&self, row: Option<TeamRecord>) -> Result<Option<Team>, TeamError> {
        match row {
            Some(row) => {
                let member_ids = self.member_ids(row.id).await?;
                Ok(Some(row.into_team(member_ids)))
            }
            None => Ok(None),
        }
    }

    async fn ensure_exists(&self, team_id: i64) -> Result<(), TeamError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teams WHERE id = ?)")
            .bind(team_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("team_exists"))?;

        if exists { Ok(()) } else { Err(TeamError::NotFound) }
    }
}

#[derive(FromRow)]
struct TeamRecord {
    id: i64,
    team_leader_id: i64,
    name: String,
    slug: String,
    avatar_url: String,
    is_default_team: bool,
    created_at: DateTime<Utc>,
}

impl TeamRecord {
    fn into_team(self, member_ids: Vec<i64>) -> Team {
        Team {
            id: self.id,
            team_leader_id: self.team_leader_id,
            name: self.name,
            slug: self.slug,
            avatar_url: self.avatar_url,
            member_ids,
            is_default_team: self.is_default_team,
            created_at: self.created_at,
        }
    }
}

fn slug_taken(slug: &str) -> TeamError {
    TeamError::Validation(format!("slug \"{slug}\" is already taken"))
}

async fn insert_member(
    conn: &mut SqliteConnection,
    team_id: i64,
    user_id: i64,
) -> Result<bool, TeamError> {
    let result = sqlx::query("INSERT OR IGNORE INTO team_members (team_id, user_id) VALUES (?, ?)")
        .bind(team_id)
        .bind(user_id)
        .execute(conn)
        .await
        .map_err(db_error("add_team_member"))?;

    Ok(result.rows_affected() > 0)
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, data), err))]
    async fn create(&self, data: CreateTeam) -> Result<Team, TeamError> {
        let mut tx = self.pool.begin().await.map_err(db_error("create_team"))?;

        let row: TeamRecord = sqlx::query_as(&format!(
            "INSERT INTO teams (team_leader_id, name, slug, avatar_url, is_default_team, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING {TEAM_COLUMNS}"
        ))
        .bind(data.team_leader_id)
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.avatar_url)
        .bind(data.is_default_team)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                slug_taken(&data.slug)
            } else {
                db_error("create_team")(e)
            }
        })?;

        insert_member(&mut tx, row.id, data.team_leader_id).await?;
        tx.commit().await.map_err(db_error("create_team"))?;

        let leader = row.team_leader_id;
        Ok(row.into_team(vec![leader]))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Team>, TeamError> {
        let row: Option<TeamRecord> =
            sqlx::query_as(&format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("find_team_by_id"))?;

        self.with_members(row).await
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Team>, TeamError> {
        let row: Option<TeamRecord> =
            sqlx::query_as(&format!("SELECT {TEAM_COLUMNS} FROM teams WHERE slug = ?"))
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("find_team_by_slug"))?;

        self.with_members(row).await
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn count_by_leader(&self, team_leader_id: i64) -> Result<u64, TeamError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams WHERE team_leader_id = ?")
            .bind(team_leader_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count_teams_by_leader"))?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, data), err))]
    async fn update(&self, id: i64, data: UpdateTeam) -> Result<Team, TeamError> {
        let row: Option<TeamRecord> = sqlx::query_as(&format!(
            "UPDATE teams SET name = ?, slug = ?, avatar_url = ? WHERE id = ? RETURNING {TEAM_COLUMNS}"
        ))
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.avatar_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                slug_taken(&data.slug)
            } else {
                db_error("update_team")(e)
            }
        })?;

        self.with_members(row).await?.ok_or(TeamError::NotFound)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn add_member(&self, team_id: i64, user_id: i64) -> Result<bool, TeamError> {
        self.ensure_exists(team_id).await?;

        let mut conn = self.pool.acquire().await.map_err(db_error("add_team_member"))?;
        insert_member(&mut conn, team_id, user_id).await
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn remove_member(&self, team_id: i64, user_id: i64) -> Result<bool, TeamError> {
        self.ensure_exists(team_id).await?;

        let result = sqlx::query("DELETE FROM team_members WHERE team_id = ? AND user_id = ?")
            .bind(team_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("remove_team_member"))?;

        Ok(result.rows_affected() > 0)
    }
}
