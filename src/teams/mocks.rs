#![allow(clippy::significant_drop_tightening)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use super::repository::{
    CreateInvitation, CreateTeam, InvitationRepository, TeamRepository, UpdateTeam,
};
use super::types::{Invitation, Team};
use crate::TeamError;

fn poisoned<T>(_: T) -> TeamError {
    TeamError::Internal("lock poisoned".into())
}

/// In-memory [`TeamRepository`]. Clones share the same storage.
#[derive(Clone)]
pub struct MockTeamRepository {
    teams: Arc<RwLock<HashMap<i64, Team>>>,
    next_id: Arc<AtomicI64>,
}

impl MockTeamRepository {
    pub fn new() -> Self {
        Self {
            teams: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for MockTeamRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeamRepository for MockTeamRepository {
    async fn create(&self, data: CreateTeam) -> Result<Team, TeamError> {
        let mut teams = self.teams.write().map_err(poisoned)?;
        if teams.values().any(|t| t.slug == data.slug) {
            return Err(TeamError::Validation(format!(
                "slug \"{}\" is already taken",
                data.slug
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let team = Team {
            id,
            team_leader_id: data.team_leader_id,
            name: data.name,
            slug: data.slug,
            avatar_url: data.avatar_url,
            member_ids: vec![data.team_leader_id],
            is_default_team: data.is_default_team,
            created_at: Utc::now(),
        };
        teams.insert(id, team.clone());

        Ok(team)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Team>, TeamError> {
        let teams = self.teams.read().map_err(poisoned)?;
        Ok(teams.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Team>, TeamError> {
        let teams = self.teams.read().map_err(poisoned)?;
        Ok(teams.values().find(|t| t.slug == slug).cloned())
    }

    async fn count_by_leader(&self, team_leader_id: i64) -> Result<u64, TeamError> {
        let teams = self.teams.read().map_err(poisoned)?;
        Ok(teams
            .values()
            .filter(|t| t.team_leader_id == team_leader_id)
            .count() as u64)
    }

    async fn update(&self, id: i64, data: UpdateTeam) -> Result<Team, TeamError> {
        let mut teams = self.teams.write().map_err(poisoned)?;
        if teams.values().any(|t| t.id != id && t.slug == data.slug) {
            return Err(TeamError::Validation(format!(
                "slug \"{}\" is already taken",
                data.slug
            )));
        }

        let team = teams.get_mut(&id).ok_or(TeamError::NotFound)?;
        team.name = data.name;
        team.slug = data.slug;
        team.avatar_url = data.avatar_url;

        Ok(team.clone())
    }

    async fn add_member(&self, team_id: i64, user_id: i64) -> Result<bool, TeamError> {
        let mut teams = self.teams.write().map_err(poisoned)?;
        let team = teams.get_mut(&team_id).ok_or(TeamError::NotFound)?;

        if team.member_ids.contains(&user_id) {
            return Ok(false);
        }
        team.member_ids.push(user_id);
        Ok(true)
    }

    async fn remove_member(&self, team_id: i64, user_id: i64) -> Result<bool, TeamError> {
        let mut teams = self.teams.write().map_err(poisoned)?;
        let team = teams.get_mut(&team_id).ok_or(TeamError::NotFound)?;

        let before = team.member_ids.len();
        team.member_ids.retain(|id| *id != user_id);
        Ok(team.member_ids.len() < before)
    }
}

/// In-memory [`InvitationRepository`]. Clones share the same storage.
#[derive(Clone)]
pub struct MockInvitationRepository {
    invitations: Arc<RwLock<HashMap<i64, Invitation>>>,
    next_id: Arc<AtomicI64>,
}

impl MockInvitationRepository {
    pub fn new() -> Self {
        Self {
            invitations: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Number of stored records, expired ones included.
    pub fn stored_count(&self) -> usize {
        self.invitations
            .read()
            .map(|i| i.len())
            .unwrap_or_default()
    }
}

impl Default for MockInvitationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InvitationRepository for MockInvitationRepository {
    async fn upsert(&self, data: CreateInvitation) -> Result<Invitation, TeamError> {
        let mut invitations = self.invitations.write().map_err(poisoned)?;
        let now = Utc::now();

        if let Some(existing) = invitations
            .values_mut()
            .find(|i| i.team_id == data.team_id && i.email == data.email)
        {
            existing.created_at = now;
            existing.expires_at = data.expires_at;
            return Ok(existing.clone());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let invitation = Invitation {
            id,
            team_id: data.team_id,
            email: data.email,
            created_at: now,
            expires_at: data.expires_at,
        };
        invitations.insert(id, invitation.clone());

        Ok(invitation)
    }

    async fn find_pending_by_team(&self, team_id: i64) -> Result<Vec<Invitation>, TeamError> {
        let invitations = self.invitations.read().map_err(poisoned)?;
        let mut pending: Vec<Invitation> = invitations
            .values()
            .filter(|i| i.team_id == team_id && !i.is_expired())
            .cloned()
            .collect();
        pending.sort_by_key(|i| (i.created_at, i.id));
        Ok(pending)
    }

    async fn delete_expired(&self) -> Result<u64, TeamError> {
        let mut invitations = self.invitations.write().map_err(poisoned)?;
        let before = invitations.len();
        invitations.retain(|_, i| !i.is_expired());
        Ok((before - invitations.len()) as u64)
    }
}
