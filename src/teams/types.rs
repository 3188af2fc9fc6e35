//! Core types for team management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A team groups users under a single leader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier.
    pub id: i64,
    /// User who created the team and alone may manage it.
    pub team_leader_id: i64,
    /// Human-readable team name.
    pub name: String,
    /// URL-friendly unique identifier.
    pub slug: String,
    pub avatar_url: String,
    /// Member user ids in insertion order, without duplicates.
    /// The leader is added when the team is created.
    pub member_ids: Vec<i64>,
    /// Whether this was the first team its leader created.
    pub is_default_team: bool,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn is_leader(&self, user_id: i64) -> bool {
        self.team_leader_id == user_id
    }

    pub fn has_member(&self, user_id: i64) -> bool {
        self.member_ids.contains(&user_id)
    }
}

/// Receipt of a direct-add invitation.
///
/// Invitees are added to the member set immediately; the record only
/// remembers which addresses were invited recently. It is unique per
/// `(team_id, email)` and disappears once `expires_at` has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: i64,
    pub team_id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Invitation {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
