use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::types::{Invitation, Team};
use crate::TeamError;

#[derive(Debug, Clone)]
pub struct CreateTeam {
    pub team_leader_id: i64,
    pub name: String,
    pub slug: String,
    pub avatar_url: String,
    pub is_default_team: bool,
}

/// Replacement values for a team's editable fields.
#[derive(Debug, Clone)]
pub struct UpdateTeam {
    pub name: String,
    pub slug: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone)]
pub struct CreateInvitation {
    pub team_id: i64,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Stores a new team whose member set holds only the leader.
    async fn create(&self, data: CreateTeam) -> Result<Team, TeamError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Team>, TeamError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Team>, TeamError>;
    async fn count_by_leader(&self, team_leader_id: i64) -> Result<u64, TeamError>;
    /// Fails with [`TeamError::NotFound`] when the team does not exist.
    async fn update(&self, id: i64, data: UpdateTeam) -> Result<Team, TeamError>;
    /// Set-union of `user_id` into the member set. Returns `false` when the
    /// user was already a member.
    async fn add_member(&self, team_id: i64, user_id: i64) -> Result<bool, TeamError>;
    /// Removes `user_id` from the member set. Returns `false` when the user
    /// was not a member.
    async fn remove_member(&self, team_id: i64, user_id: i64) -> Result<bool, TeamError>;
}

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Writes the invitation for `(team_id, email)`, replacing the creation
    /// and expiry times of an existing one.
    async fn upsert(&self, data: CreateInvitation) -> Result<Invitation, TeamError>;
    /// Invitations of the team that have not expired yet, oldest first.
    async fn find_pending_by_team(&self, team_id: i64) -> Result<Vec<Invitation>, TeamError>;
    /// Deletes expired invitations and returns how many were removed.
    async fn delete_expired(&self) -> Result<u64, TeamError>;
}
