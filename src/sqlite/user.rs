use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use super::{db_error, is_unique_violation};
use crate::{CreateUser, TeamError, User, UserRepository};

const USER_COLUMNS: &str = "id, email, slug, display_name, avatar_url, default_team_slug, is_signedup_via_google, dark_theme, created_at";

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_by(&self, column: &'static str, value: &str) -> Result<Option<User>, TeamError> {
        let row: Option<UserRecord> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?"))
                .bind(value)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("find_user"))?;

        Ok(row.map(Into::into))
    }
}

#[derive(FromRow)]
struct UserRecord {
    id: i64,
    email: String,
    slug: String,
    display_name: String,
    avatar_url: Option<String>,
    default_team_slug: String,
    is_signedup_via_google: bool,
    dark_theme: bool,
    created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(row: UserRecord) -> Self {
        User {
            id: row.id,
            email: row.email,
            slug: row.slug,
            display_name: row.display_name,
            avatar_url: row.avatar_url,
            default_team_slug: row.default_team_slug,
            is_signedup_via_google: row.is_signedup_via_google,
            dark_theme: row.dark_theme,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, TeamError> {
        let row: Option<UserRecord> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("find_user_by_id"))?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, email), err))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, TeamError> {
        self.find_by("email", email).await
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_user_by_slug(&self, slug: &str) -> Result<Option<User>, TeamError> {
        self.find_by("slug", slug).await
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, data), err))]
    async fn create_user(&self, data: CreateUser) -> Result<User, TeamError> {
        let row: UserRecord = sqlx::query_as(&format!(
            "INSERT INTO users (email, slug, display_name, avatar_url, is_signedup_via_google, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(&data.email)
        .bind(&data.slug)
        .bind(&data.display_name)
        .bind(&data.avatar_url)
        .bind(data.is_signedup_via_google)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                TeamError::UserAlreadyExists
            } else {
                db_error("create_user")(e)
            }
        })?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn set_default_team_slug(&self, user_id: i64, slug: &str) -> Result<(), TeamError> {
        let result = sqlx::query("UPDATE users SET default_team_slug = ? WHERE id = ?")
            .bind(slug)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("set_default_team_slug"))?;

        if result.rows_affected() == 0 {
            return Err(TeamError::NotFound);
        }

        Ok(())
    }
}
