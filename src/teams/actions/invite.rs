use chrono::Utc;

use crate::actions::ProvisionUserAction;
use crate::config::InvitationConfig;
use crate::events::{TeamEvent, dispatch};
use crate::teams::{CreateInvitation, Invitation, InvitationRepository, Team, TeamRepository};
use crate::validators::validate_email;
use crate::{PublicUser, TeamError, UserRepository};

#[derive(Debug, Clone)]
pub struct InviteMemberInput {
    pub team_id: i64,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct InviteMemberOutput {
    /// Receipt recorded for `(team, email)`.
    pub invitation: Invitation,
    pub user: PublicUser,
    /// The team after the member was added.
    pub team: Team,
    /// Whether a user record was created for the email.
    pub provisioned: bool,
}

/// Adds a user to a team by email. Leader only.
///
/// This action:
/// 1. Validates the email
/// 2. Verifies the team exists and the caller leads it
/// 3. Finds the user for the email, provisioning one if needed
/// 4. Adds the user to the member set
/// 5. Points the user's default team at this team (unless they lead it)
/// 6. Records an invitation receipt that expires after the configured TTL
///
/// There is no acceptance step: the member is added immediately.
pub struct InviteMemberAction<T, U, I>
where
    T: TeamRepository,
    U: UserRepository + Clone,
    I: InvitationRepository,
{
    team_repo: T,
    user_repo: U,
    invitation_repo: I,
    config: InvitationConfig,
}

impl<T, U, I> InviteMemberAction<T, U, I>
where
    T: TeamRepository,
    U: UserRepository + Clone,
    I: InvitationRepository,
{
    pub fn new(team_repo: T, user_repo: U, invitation_repo: I) -> Self {
        Self::with_config(team_repo, user_repo, invitation_repo, InvitationConfig::default())
    }

    pub fn with_config(
        team_repo: T,
        user_repo: U,
        invitation_repo: I,
        config: InvitationConfig,
    ) -> Self {
        Self {
            team_repo,
            user_repo,
            invitation_repo,
            config,
        }
    }

    /// # Returns
    ///
    /// - `Ok(output)` - the member was added
    /// - `Err(TeamError::Validation(_))` - email missing or malformed
    /// - `Err(TeamError::Forbidden)` - team missing or caller is not its leader
    /// - `Err(TeamError::AlreadyMember)` - the user is already in the team; nothing changed
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "invite_member", skip(self, input), err)
    )]
    pub async fn execute(
        &self,
        caller_id: i64,
        input: InviteMemberInput,
    ) -> Result<InviteMemberOutput, TeamError> {
        let email = input.email.trim();
        validate_email(email)?;

        let team = self
            .team_repo
            .find_by_id(input.team_id)
            .await?
            .filter(|team| team.is_leader(caller_id))
            .ok_or(TeamError::Forbidden)?;

        let provisioned = ProvisionUserAction::new(self.user_repo.clone())
            .execute(email)
            .await?;
        let mut user = provisioned.user;

        if team.has_member(user.id) {
            return Err(TeamError::AlreadyMember);
        }

        // a concurrent invite may have won the race; treat it the same way
        if !self.team_repo.add_member(team.id, user.id).await? {
            return Err(TeamError::AlreadyMember);
        }

        if !team.is_leader(user.id) {
            self.user_repo
                .set_default_team_slug(user.id, &team.slug)
                .await?;
            user.default_team_slug.clone_from(&team.slug);
        }

        let invitation = self
            .invitation_repo
            .upsert(CreateInvitation {
                team_id: team.id,
                email: user.email.clone(),
                expires_at: Utc::now() + self.config.ttl,
            })
            .await?;

        let team = self
            .team_repo
            .find_by_id(team.id)
            .await?
            .ok_or(TeamError::NotFound)?;

        log::info!(
            target: "teamwork",
            "msg=\"member added\", team_id={}, user_id={}, invitation_id={}, provisioned={}",
            team.id,
            user.id,
            invitation.id,
            provisioned.created
        );

        dispatch(TeamEvent::MemberAdded {
            team_id: team.id,
            user_id: user.id,
            invited_by: caller_id,
            at: Utc::now(),
        })
        .await;

        Ok(InviteMemberOutput {
            invitation,
            user: user.into(),
            team,
            provisioned: provisioned.created,
        })
    }
}
