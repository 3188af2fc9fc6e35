//! End-to-end team workflows over mock repositories.
//!
//! Run with: `cargo test --features mocks --test e2e_teams`

#![cfg(feature = "mocks")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{Duration, Utc};
use teamwork::actions::ProvisionUserAction;
use teamwork::config::InvitationConfig;
use teamwork::teams::{
    AddTeamAction, AddTeamInput, CreateInvitation, GetTeamInvitationsAction, InvitationRepository,
    InviteMemberAction, InviteMemberInput, MockInvitationRepository, MockTeamRepository,
    PruneExpiredInvitationsAction, RemoveMemberAction, RemoveMemberInput, TeamRepository,
    UpdateTeamAction, UpdateTeamInput,
};
use teamwork::{MockUserRepository, TeamError, UserRepository};

struct Repos {
    users: MockUserRepository,
    teams: MockTeamRepository,
    invitations: MockInvitationRepository,
}

fn repos() -> Repos {
    Repos {
        users: MockUserRepository::new(),
        teams: MockTeamRepository::new(),
        invitations: MockInvitationRepository::new(),
    }
}

async fn signup(repos: &Repos, email: &str) -> i64 {
    ProvisionUserAction::new(repos.users.clone())
        .execute(email)
        .await
        .unwrap()
        .user
        .id
}

fn acme() -> AddTeamInput {
    AddTeamInput {
        name: "Acme".to_owned(),
        avatar_url: "https://example.com/acme.png".to_owned(),
    }
}

#[tokio::test]
async fn test_leader_creates_team_and_invites_new_email() {
    let repos = repos();
    let leader = signup(&repos, "leader@x.com").await;

    let team = AddTeamAction::new(repos.teams.clone(), repos.users.clone())
        .execute(leader, acme())
        .await
        .unwrap();
    assert_eq!(team.slug, "acme");

    let invite = InviteMemberAction::new(
        repos.teams.clone(),
        repos.users.clone(),
        repos.invitations.clone(),
    );
    let output = invite
        .execute(
            leader,
            InviteMemberInput {
                team_id: team.id,
                email: "new@x.com".to_owned(),
            },
        )
        .await
        .unwrap();

    assert_eq!(output.user.slug, "new-x-com");
    assert_eq!(output.user.default_team_slug, "acme");
    assert_eq!(
        output
            .team
            .member_ids
            .iter()
            .filter(|id| **id == output.user.id)
            .count(),
        1
    );

    let listed = GetTeamInvitationsAction::new(repos.teams.clone(), repos.invitations.clone())
        .execute(leader, team.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].email, "new@x.com");

    // exactly one user was provisioned for the email
    let again = invite
        .execute(
            leader,
            InviteMemberInput {
                team_id: team.id,
                email: "new@x.com".to_owned(),
            },
        )
        .await;
    assert_eq!(again.unwrap_err(), TeamError::AlreadyMember);
    assert_eq!(repos.users.len(), 2);
}

#[tokio::test]
async fn test_member_in_two_teams_follows_latest_invite() {
    let repos = repos();
    let first_leader = signup(&repos, "one@x.com").await;
    let second_leader = signup(&repos, "two@x.com").await;
    let member = signup(&repos, "member@x.com").await;

    let add = AddTeamAction::new(repos.teams.clone(), repos.users.clone());
    let first = add.execute(first_leader, acme()).await.unwrap();
    let second = add.execute(second_leader, acme()).await.unwrap();
    assert_eq!(second.slug, "acme-1");

    let invite = InviteMemberAction::new(
        repos.teams.clone(),
        repos.users.clone(),
        repos.invitations.clone(),
    );
    for (leader, team_id) in [(first_leader, first.id), (second_leader, second.id)] {
        invite
            .execute(
                leader,
                InviteMemberInput {
                    team_id,
                    email: "member@x.com".to_owned(),
                },
            )
            .await
            .unwrap();
    }

    let member = repos.users.find_user_by_id(member).await.unwrap().unwrap();
    assert_eq!(member.default_team_slug, "acme-1");
}

#[tokio::test]
async fn test_non_leader_cannot_manage_team() {
    let repos = repos();
    let leader = signup(&repos, "leader@x.com").await;
    let outsider = signup(&repos, "outsider@x.com").await;

    let team = AddTeamAction::new(repos.teams.clone(), repos.users.clone())
        .execute(leader, acme())
        .await
        .unwrap();

    let invite = InviteMemberAction::new(
        repos.teams.clone(),
        repos.users.clone(),
        repos.invitations.clone(),
    )
    .execute(
        outsider,
        InviteMemberInput {
            team_id: team.id,
            email: "new@x.com".to_owned(),
        },
    )
    .await;
    assert_eq!(invite.unwrap_err(), TeamError::Forbidden);

    let listed = GetTeamInvitationsAction::new(repos.teams.clone(), repos.invitations.clone())
        .execute(outsider, team.id)
        .await;
    assert_eq!(listed.unwrap_err(), TeamError::Forbidden);

    let removed = RemoveMemberAction::new(repos.teams.clone())
        .execute(
            outsider,
            RemoveMemberInput {
                team_id: team.id,
                user_id: leader,
            },
        )
        .await;
    assert_eq!(removed.unwrap_err(), TeamError::Forbidden);

    let updated = UpdateTeamAction::new(repos.teams.clone())
        .execute(
            outsider,
            UpdateTeamInput {
                team_id: team.id,
                name: "Mine".to_owned(),
                avatar_url: "https://example.com/mine.png".to_owned(),
            },
        )
        .await;
    assert_eq!(updated.unwrap_err(), TeamError::Forbidden);

    let team = repos.teams.find_by_id(team.id).await.unwrap().unwrap();
    assert_eq!(team.member_ids, vec![leader]);
    assert_eq!(team.name, "Acme");
}

#[tokio::test]
async fn test_remove_then_reinvite() {
    let repos = repos();
    let leader = signup(&repos, "leader@x.com").await;
    let team = AddTeamAction::new(repos.teams.clone(), repos.users.clone())
        .execute(leader, acme())
        .await
        .unwrap();

    let invite = InviteMemberAction::new(
        repos.teams.clone(),
        repos.users.clone(),
        repos.invitations.clone(),
    );
    let input = InviteMemberInput {
        team_id: team.id,
        email: "new@x.com".to_owned(),
    };
    let added = invite.execute(leader, input.clone()).await.unwrap();

    RemoveMemberAction::new(repos.teams.clone())
        .execute(
            leader,
            RemoveMemberInput {
                team_id: team.id,
                user_id: added.user.id,
            },
        )
        .await
        .unwrap();

    let readded = invite.execute(leader, input).await.unwrap();
    assert!(!readded.provisioned);
    assert_eq!(readded.user.id, added.user.id);
    assert_eq!(readded.team.member_ids, vec![leader, added.user.id]);

    // the receipt was refreshed, not duplicated
    assert_eq!(repos.invitations.stored_count(), 1);
}

#[tokio::test]
async fn test_expired_invitations_are_hidden_then_pruned() {
    let repos = repos();
    let leader = signup(&repos, "leader@x.com").await;
    let team = AddTeamAction::new(repos.teams.clone(), repos.users.clone())
        .execute(leader, acme())
        .await
        .unwrap();

    let short_lived = InviteMemberAction::with_config(
        repos.teams.clone(),
        repos.users.clone(),
        repos.invitations.clone(),
        InvitationConfig {
            ttl: Duration::seconds(-1),
            ..Default::default()
        },
    );
    short_lived
        .execute(
            leader,
            InviteMemberInput {
                team_id: team.id,
                email: "gone@x.com".to_owned(),
            },
        )
        .await
        .unwrap();

    repos
        .invitations
        .upsert(CreateInvitation {
            team_id: team.id,
            email: "kept@x.com".to_owned(),
            expires_at: Utc::now() + Duration::hours(1),
        })
        .await
        .unwrap();

    let listed = GetTeamInvitationsAction::new(repos.teams.clone(), repos.invitations.clone())
        .execute(leader, team.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].email, "kept@x.com");

    let pruned = PruneExpiredInvitationsAction::new(repos.invitations.clone())
        .execute()
        .await
        .unwrap();
    assert_eq!(pruned, 1);
    assert_eq!(repos.invitations.stored_count(), 1);
}
