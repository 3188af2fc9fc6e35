use chrono::Utc;

use crate::TeamError;
use crate::events::{TeamEvent, dispatch};
use crate::teams::TeamRepository;

#[derive(Debug, Clone, Copy)]
pub struct RemoveMemberInput {
    pub team_id: i64,
    pub user_id: i64,
}

/// Removes a user from a team's member set. Leader only; the leader cannot
/// be removed. Removing a non-member succeeds without changes.
pub struct RemoveMemberAction<T: TeamRepository> {
    team_repo: T,
}

impl<T: TeamRepository> RemoveMemberAction<T> {
    pub fn new(team_repo: T) -> Self {
        Self { team_repo }
    }

    /// Fails with [`TeamError::Forbidden`] when the team is missing, the
    /// caller does not lead it, or `user_id` is the leader.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "remove_member", skip(self), err)
    )]
    pub async fn execute(&self, caller_id: i64, input: RemoveMemberInput) -> Result<(), TeamError> {
        let team = self
            .team_repo
            .find_by_id(input.team_id)
            .await?
            .filter(|team| team.is_leader(caller_id) && !team.is_leader(input.user_id))
            .ok_or(TeamError::Forbidden)?;

        let removed = self.team_repo.remove_member(team.id, input.user_id).await?;
        if !removed {
            log::debug!(
                target: "teamwork",
                "msg=\"remove member skipped, not a member\", team_id={}, user_id={}",
                team.id,
                input.user_id
            );
            return Ok(());
        }

        log::info!(
            target: "teamwork",
            "msg=\"member removed\", team_id={}, user_id={}, removed_by={caller_id}",
            team.id,
            input.user_id
        );

        dispatch(TeamEvent::MemberRemoved {
            team_id: team.id,
            user_id: input.user_id,
            removed_by: caller_id,
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}
