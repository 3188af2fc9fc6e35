//! `SQLite` implementations of the repository traits, enabled by the
//! `sqlx_sqlite` feature.

pub mod migrations;
mod teams;
mod token;
mod user;

use sqlx::SqlitePool;

pub use teams::{SqliteInvitationRepository, SqliteTeamRepository};
pub use token::SqliteTokenRepository;
pub use user::SqliteUserRepository;

use crate::TeamError;

/// All repositories over one pool.
pub fn create_repositories(
    pool: SqlitePool,
) -> (
    SqliteUserRepository,
    SqliteTokenRepository,
    SqliteTeamRepository,
    SqliteInvitationRepository,
) {
    (
        SqliteUserRepository::new(pool.clone()),
        SqliteTokenRepository::new(pool.clone()),
        SqliteTeamRepository::new(pool.clone()),
        SqliteInvitationRepository::new(pool),
    )
}

/// Logs a failed statement and wraps it as [`TeamError::DatabaseError`].
pub(crate) fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> TeamError {
    move |e| {
        log::error!(
            target: "teamwork",
            "msg=\"database error\", operation=\"{operation}\", error=\"{e}\""
        );
        TeamError::DatabaseError(e.to_string())
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
