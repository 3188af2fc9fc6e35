use chrono::{DateTime, Utc};

/// Events emitted by team actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamEvent {
    TeamCreated {
        team_id: i64,
        team_leader_id: i64,
        slug: String,
        at: DateTime<Utc>,
    },
    TeamUpdated {
        team_id: i64,
        slug: String,
        at: DateTime<Utc>,
    },
    /// A user record was created for an invited email.
    UserProvisioned {
        user_id: i64,
        email: String,
        at: DateTime<Utc>,
    },
    MemberAdded {
        team_id: i64,
        user_id: i64,
        invited_by: i64,
        at: DateTime<Utc>,
    },
    MemberRemoved {
        team_id: i64,
        user_id: i64,
        removed_by: i64,
        at: DateTime<Utc>,
    },
    InvitationsPruned {
        count: u64,
        at: DateTime<Utc>,
    },
}

impl TeamEvent {
    /// Dot-separated event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TeamCreated { .. } => "team.created",
            Self::TeamUpdated { .. } => "team.updated",
            Self::UserProvisioned { .. } => "user.provisioned",
            Self::MemberAdded { .. } => "team.member.added",
            Self::MemberRemoved { .. } => "team.member.removed",
            Self::InvitationsPruned { .. } => "team.invitations.pruned",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::TeamCreated { at, .. }
            | Self::TeamUpdated { at, .. }
            | Self::UserProvisioned { at, .. }
            | Self::MemberAdded { at, .. }
            | Self::MemberRemoved { at, .. }
            | Self::InvitationsPruned { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();

        assert_eq!(
            TeamEvent::TeamCreated {
                team_id: 1,
                team_leader_id: 1,
                slug: "acme".to_owned(),
                at: now
            }
            .name(),
            "team.created"
        );
        assert_eq!(
            TeamEvent::UserProvisioned {
                user_id: 2,
                email: "new@x.com".to_owned(),
                at: now
            }
            .name(),
            "user.provisioned"
        );
        assert_eq!(
            TeamEvent::MemberRemoved {
                team_id: 1,
                user_id: 2,
                removed_by: 1,
                at: now
            }
            .name(),
            "team.member.removed"
        );
        assert_eq!(
            TeamEvent::InvitationsPruned { count: 3, at: now }.name(),
            "team.invitations.pruned"
        );
    }

    #[test]
    fn test_event_timestamp() {
        let now = Utc::now();
        let event = TeamEvent::MemberAdded {
            team_id: 1,
            user_id: 2,
            invited_by: 1,
            at: now,
        };

        assert_eq!(event.timestamp(), now);
    }
}
