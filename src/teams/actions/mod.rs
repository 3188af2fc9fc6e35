mod add_team;
mod invitations;
mod invite;
mod prune_expired;
mod remove_member;
mod update_team;

pub use add_team::{AddTeamAction, AddTeamInput};
pub use invitations::GetTeamInvitationsAction;
pub use invite::{InviteMemberAction, InviteMemberInput, InviteMemberOutput};
pub use prune_expired::PruneExpiredInvitationsAction;
pub use remove_member::{RemoveMemberAction, RemoveMemberInput};
pub use update_team::{UpdateTeamAction, UpdateTeamInput};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::teams::{CreateTeam, MockTeamRepository, Team, TeamRepository};
    use crate::{CreateUser, MockUserRepository, User, UserRepository};

    pub async fn user(repo: &MockUserRepository, email: &str) -> User {
        repo.create_user(CreateUser {
            email: email.to_owned(),
            slug: crate::slug::slugify(email),
            display_name: email.to_owned(),
            avatar_url: None,
            is_signedup_via_google: true,
        })
        .await
        .unwrap()
    }

    pub async fn team(repo: &MockTeamRepository, leader: &User, slug: &str) -> Team {
        repo.create(CreateTeam {
            team_leader_id: leader.id,
            name: slug.to_owned(),
            slug: slug.to_owned(),
            avatar_url: "https://example.com/team.png".to_owned(),
            is_default_team: true,
        })
        .await
        .unwrap()
    }
}
