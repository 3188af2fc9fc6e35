//! Run periodically to drop invitation receipts past their TTL.

use chrono::Utc;

use crate::TeamError;
use crate::events::{TeamEvent, dispatch};
use crate::teams::InvitationRepository;

pub struct PruneExpiredInvitationsAction<I: InvitationRepository> {
    invitation_repo: I,
}

impl<I: InvitationRepository> PruneExpiredInvitationsAction<I> {
    pub fn new(invitation_repo: I) -> Self {
        Self { invitation_repo }
    }

    /// Returns how many invitations were deleted.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "prune_expired_invitations", skip(self), err)
    )]
    pub async fn execute(&self) -> Result<u64, TeamError> {
        let count = self.invitation_repo.delete_expired().await?;

        if count > 0 {
            log::info!(
                target: "teamwork",
                "msg=\"expired invitations pruned\", count={count}"
            );
            dispatch(TeamEvent::InvitationsPruned {
                count,
                at: Utc::now(),
            })
            .await;
        }

        Ok(count)
    }
}
