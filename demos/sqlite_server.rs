#![allow(clippy::print_stdout, clippy::unwrap_used, clippy::expect_used)]

//! Team-leader API backed by `SQLite`.
//!
//! Run with: `cargo run --example sqlite_server`
//!
//! Configuration comes from the environment (`DATABASE_URL`,
//! `TEAMWORK_BIND_ADDR`, `TEAMWORK_INVITATION_TTL_HOURS`,
//! `TEAMWORK_PRUNE_INTERVAL_SECS`); `RUST_LOG` controls log output.
//!
//! A leader account is seeded on startup and its bearer token printed:
//!
//!   curl -X POST http://localhost:8000/api/v1/team-leader/teams/add \
//!     -H "Authorization: Bearer <token>" -H "Content-Type: application/json" \
//!     -d '{"name": "Acme", "avatarUrl": "https://example.com/acme.png"}'
//!
//!   curl -X POST http://localhost:8000/api/v1/team-leader/teams/invite-member \
//!     -H "Authorization: Bearer <token>" -H "Content-Type: application/json" \
//!     -d '{"teamId": 1, "email": "new@x.com"}'

use axum::Router;
use sqlx::sqlite::SqlitePoolOptions;
use teamwork::actions::{IssueTokenAction, ProvisionUserAction};
use teamwork::api::axum::{AppState, team_leader_routes};
use teamwork::billing::PendingBillingProvider;
use teamwork::events::listeners::LoggingListener;
use teamwork::sqlite::{
    SqliteInvitationRepository, SqliteTeamRepository, SqliteTokenRepository,
    SqliteUserRepository, create_repositories, migrations,
};
use teamwork::teams::PruneExpiredInvitationsAction;
use teamwork::{TeamworkConfig, register_event_listeners};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

const SEED_LEADER_EMAIL: &str = "leader@example.com";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = TeamworkConfig::from_env().expect("invalid configuration");

    register_event_listeners(|registry| {
        registry.listen(LoggingListener::new());
    });

    // a single connection keeps `sqlite::memory:` on one database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&config.server.database_url)
        .await
        .expect("failed to open database");
    migrations::run(&pool).await.expect("failed to run migrations");

    let (user_repo, token_repo, team_repo, invitation_repo) = create_repositories(pool);

    let leader = ProvisionUserAction::new(user_repo.clone())
        .execute(SEED_LEADER_EMAIL)
        .await
        .expect("failed to seed leader")
        .user;
    let issued = IssueTokenAction::with_config(token_repo.clone(), config.tokens.clone())
        .execute(leader.id)
        .await
        .expect("failed to issue token");

    let prune_every = config.invitations.prune_interval;
    let prune_invitations = PruneExpiredInvitationsAction::new(invitation_repo.clone());
    let prune_tokens = token_repo.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(prune_every);
        loop {
            interval.tick().await;
            if let Err(e) = prune_invitations.execute().await {
                log::warn!(target: "teamwork", "msg=\"invitation prune failed\", error=\"{e}\"");
            }
            if let Err(e) = prune_tokens.prune_expired().await {
                log::warn!(target: "teamwork", "msg=\"token prune failed\", error=\"{e}\"");
            }
        }
    });

    let bind_addr = config.server.bind_addr.clone();
    let state = AppState {
        user_repo,
        token_repo,
        team_repo,
        invitation_repo,
        billing: PendingBillingProvider,
        config,
    };

    let app = Router::new()
        .nest(
            "/api/v1/team-leader",
            team_leader_routes::<
                SqliteUserRepository,
                SqliteTokenRepository,
                SqliteTeamRepository,
                SqliteInvitationRepository,
                PendingBillingProvider,
            >(),
        )
        .with_state(state);

    println!("Team-leader API on http://{bind_addr}/api/v1/team-leader");
    println!("Seeded leader {SEED_LEADER_EMAIL} (id {})", leader.id);
    println!("Bearer token: {}", issued.token.expose_secret());

    let listener = TcpListener::bind(&bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
