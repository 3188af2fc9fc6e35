//! Embedded `SQLite` schema migrations.
//!
//! ```rust,ignore
//! use teamwork::sqlite::migrations;
//! use sqlx::SqlitePool;
//!
//! async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
//!     migrations::run(pool).await
//! }
//! ```

use sqlx::{Executor, SqlitePool};

/// Users and access tokens.
const CORE_MIGRATIONS: &[(&str, &str)] = &[
    (
        "20250301000001_create_users_table",
        include_str!("../../migrations_sqlite/core/20250301000001_create_users_table.sql"),
    ),
    (
        "20250301000002_create_access_tokens_table",
        include_str!("../../migrations_sqlite/core/20250301000002_create_access_tokens_table.sql"),
    ),
];

/// Teams, member sets and invitation receipts.
const TEAMS_MIGRATIONS: &[(&str, &str)] = &[
    (
        "20250301000003_create_teams_table",
        include_str!("../../migrations_sqlite/teams/20250301000003_create_teams_table.sql"),
    ),
    (
        "20250301000004_create_team_members_table",
        include_str!("../../migrations_sqlite/teams/20250301000004_create_team_members_table.sql"),
    ),
    (
        "20250301000005_create_invitations_table",
        include_str!("../../migrations_sqlite/teams/20250301000005_create_invitations_table.sql"),
    ),
];

/// Applies every migration not yet recorded in `_teamwork_migrations`, in
/// order.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(
        r"
        CREATE TABLE IF NOT EXISTS _teamwork_migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        ",
    )
    .await?;

    run_migrations(pool, CORE_MIGRATIONS).await?;
    run_migrations(pool, TEAMS_MIGRATIONS).await?;

    Ok(())
}

/// Statements are split on `;`, so migration files must not contain
/// semicolons inside string literals.
async fn run_migrations(pool: &SqlitePool, migrations: &[(&str, &str)]) -> Result<(), sqlx::Error> {
    for (name, sql) in migrations {
        let applied: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _teamwork_migrations WHERE name = ?)")
                .bind(*name)
                .fetch_one(pool)
                .await?;

        if applied {
            continue;
        }

        for statement in sql.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                pool.execute(trimmed).await?;
            }
        }

        sqlx::query("INSERT INTO _teamwork_migrations (name) VALUES (?)")
            .bind(*name)
            .execute(pool)
            .await?;

        log::debug!(target: "teamwork", "msg=\"migration applied\", name=\"{name}\"");
    }
    Ok(())
}
