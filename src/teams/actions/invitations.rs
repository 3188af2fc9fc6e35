use crate::TeamError;
use crate::teams::{Invitation, InvitationRepository, TeamRepository};

/// Lists a team's unexpired invitation receipts. Leader only.
pub struct GetTeamInvitationsAction<T: TeamRepository, I: InvitationRepository> {
    team_repo: T,
    invitation_repo: I,
}

impl<T: TeamRepository, I: InvitationRepository> GetTeamInvitationsAction<T, I> {
    pub fn new(team_repo: T, invitation_repo: I) -> Self {
        Self {
            team_repo,
            invitation_repo,
        }
    }

    /// Fails with [`TeamError::Forbidden`] when the team is missing or the
    /// caller does not lead it.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "get_team_invitations", skip(self), err)
    )]
    pub async fn execute(&self, caller_id: i64, team_id: i64) -> Result<Vec<Invitation>, TeamError> {
        let team = self
            .team_repo
            .find_by_id(team_id)
            .await?
            .filter(|team| team.is_leader(caller_id))
            .ok_or(TeamError::Forbidden)?;

        self.invitation_repo.find_pending_by_team(team.id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::MockUserRepository;
    use crate::teams::actions::test_support::{team, user};
    use crate::teams::{CreateInvitation, MockInvitationRepository, MockTeamRepository};

    #[tokio::test]
    async fn test_lists_pending_for_leader() {
        let users = MockUserRepository::new();
        let teams = MockTeamRepository::new();
        let invitations = MockInvitationRepository::new();
        let leader = user(&users, "leader@x.com").await;
        let acme = team(&teams, &leader, "acme").await;
        let globex = team(&teams, &leader, "globex").await;

        for (team_id, email, hours) in [
            (acme.id, "a@x.com", 1),
            (acme.id, "old@x.com", -1),
            (globex.id, "b@x.com", 1),
        ] {
            invitations
                .upsert(CreateInvitation {
                    team_id,
                    email: email.to_owned(),
                    expires_at: Utc::now() + Duration::hours(hours),
                })
                .await
                .unwrap();
        }

        let action = GetTeamInvitationsAction::new(teams, invitations);
        let listed = action.execute(leader.id, acme.id).await.unwrap();

        let emails: Vec<&str> = listed.iter().map(|i| i.email.as_str()).collect();
        assert_eq!(emails, vec!["a@x.com"]);
    }

    #[tokio::test]
    async fn test_forbidden_for_non_leader_and_missing_team() {
        let users = MockUserRepository::new();
        let teams = MockTeamRepository::new();
        let leader = user(&users, "leader@x.com").await;
        let other = user(&users, "other@x.com").await;
        let acme = team(&teams, &leader, "acme").await;

        let action = GetTeamInvitationsAction::new(teams, MockInvitationRepository::new());

        assert_eq!(
            action.execute(other.id, acme.id).await.unwrap_err(),
            TeamError::Forbidden
        );
        assert_eq!(
            action.execute(leader.id, 999).await.unwrap_err(),
            TeamError::Forbidden
        );
    }
}
