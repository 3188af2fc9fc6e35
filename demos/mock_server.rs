#![allow(clippy::print_stdout, clippy::unwrap_used, clippy::expect_used)]

//! Team-leader API over in-memory repositories. State is lost on exit.
//!
//! Run with: `cargo run --example mock_server --no-default-features --features "axum_api mocks"`

use axum::Router;
use teamwork::actions::{IssueTokenAction, ProvisionUserAction};
use teamwork::api::axum::{AppState, team_leader_routes};
use teamwork::billing::PendingBillingProvider;
use teamwork::events::listeners::LoggingListener;
use teamwork::teams::{
    AddTeamAction, AddTeamInput, MockInvitationRepository, MockTeamRepository,
    PruneExpiredInvitationsAction,
};
use teamwork::{MockTokenRepository, MockUserRepository, TeamworkConfig, register_event_listeners};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let config = TeamworkConfig::development();

    register_event_listeners(|registry| {
        registry.listen(LoggingListener::with_level(log::Level::Debug));
    });

    let user_repo = MockUserRepository::new();
    let token_repo = MockTokenRepository::new();
    let team_repo = MockTeamRepository::new();
    let invitation_repo = MockInvitationRepository::new();

    let leader = ProvisionUserAction::new(user_repo.clone())
        .execute("leader@example.com")
        .await
        .expect("failed to seed leader")
        .user;
    let team = AddTeamAction::new(team_repo.clone(), user_repo.clone())
        .execute(
            leader.id,
            AddTeamInput {
                name: "Demo Team".to_owned(),
                avatar_url: "https://example.com/demo.png".to_owned(),
            },
        )
        .await
        .expect("failed to seed team");
    let issued = IssueTokenAction::with_config(token_repo.clone(), config.tokens.clone())
        .execute(leader.id)
        .await
        .expect("failed to issue token");

    let prune_every = config.invitations.prune_interval;
    let prune = PruneExpiredInvitationsAction::new(invitation_repo.clone());
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(prune_every);
        loop {
            interval.tick().await;
            let _ = prune.execute().await;
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
                MockUserRepository,
                MockTokenRepository,
                MockTeamRepository,
                MockInvitationRepository,
                PendingBillingProvider,
            >(),
        )
        .with_state(state);

    println!("Team-leader API on http://{bind_addr}/api/v1/team-leader");
    println!("Seeded team \"{}\" (id {}, slug {})", team.name, team.id, team.slug);
    println!("Bearer token: {}", issued.token.expose_secret());
    println!(
        "Billing page: http://{bind_addr}/api/v1/team-leader/billing?teamSlug={}",
        team.slug
    );

    let listener = TcpListener::bind(&bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
