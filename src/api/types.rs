use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::teams::{Invitation, Team};
use crate::validators::ValidationError;
use crate::{PublicUser, TeamError};

// Request DTOs
//
// Every field is optional so that a missing field surfaces as a validation
// error naming the field instead of a deserialization failure.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTeamRequest {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    pub team_id: Option<i64>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteMemberRequest {
    pub team_id: Option<i64>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMemberRequest {
    pub team_id: Option<i64>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamIdQuery {
    pub team_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingPageQuery {
    pub team_slug: Option<String>,
}

/// Unwraps a request field or reports it as missing.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, TeamError> {
    value.ok_or_else(|| ValidationError::MissingField(field).into())
}

// Response DTOs

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: i64,
    pub team_leader_id: i64,
    pub name: String,
    pub slug: String,
    pub avatar_url: String,
    pub member_ids: Vec<i64>,
    pub is_default_team: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        TeamResponse {
            id: team.id,
            team_leader_id: team.team_leader_id,
            name: team.name,
            slug: team.slug,
            avatar_url: team.avatar_url,
            member_ids: team.member_ids,
            is_default_team: team.is_default_team,
            created_at: team.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvitationSummary {
    pub id: i64,
    pub email: String,
}

impl From<Invitation> for InvitationSummary {
    fn from(invitation: Invitation) -> Self {
        InvitationSummary {
            id: invitation.id,
            email: invitation.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InvitationsResponse {
    pub invitations: Vec<InvitationSummary>,
}

#[derive(Debug, Serialize)]
pub struct InviteMemberResponse {
    pub user: PublicUser,
    pub team: TeamResponse,
}

#[derive(Debug, Serialize)]
pub struct DoneResponse {
    pub done: u8,
}

impl DoneResponse {
    pub fn done() -> Self {
        Self { done: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<TeamError> for ErrorResponse {
    fn from(err: TeamError) -> Self {
        let code = match &err {
            // unauthenticated callers get the bare `{"error":"Unauthorized"}` body
            TeamError::Unauthorized => None,
            TeamError::Validation(_) => Some("BAD_INPUT"),
            TeamError::NotFound => Some("NOT_FOUND"),
            TeamError::Forbidden => Some("PERMISSION_DENIED"),
            TeamError::AlreadyMember => Some("ALREADY_MEMBER"),
            TeamError::UserAlreadyExists => Some("USER_ALREADY_EXISTS"),
            TeamError::DatabaseError(_) => Some("DATABASE_ERROR"),
            TeamError::Internal(_) => Some("INTERNAL_ERROR"),
        };

        ErrorResponse {
            error: err.to_string(),
            code: code.map(ToOwned::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unauthorized_body_has_no_code() {
        let body = serde_json::to_value(ErrorResponse::from(TeamError::Unauthorized)).unwrap();
        assert_eq!(body, json!({ "error": "Unauthorized" }));
    }

    #[test]
    fn test_error_codes() {
        let body = serde_json::to_value(ErrorResponse::from(TeamError::AlreadyMember)).unwrap();
        assert_eq!(
            body,
            json!({ "error": "This user is already a Team Member.", "code": "ALREADY_MEMBER" })
        );
    }

    #[test]
    fn test_required_field() {
        assert_eq!(required(Some(3), "teamId"), Ok(3));
        assert_eq!(
            required::<i64>(None, "teamId"),
            Err(TeamError::Validation("teamId is required".to_owned()))
        );
    }

    #[test]
    fn test_requests_use_camel_case() {
        let req: UpdateTeamRequest =
            serde_json::from_value(json!({ "teamId": 4, "name": "Acme", "avatarUrl": "a.png" }))
                .unwrap();
        assert_eq!(req.team_id, Some(4));
        assert_eq!(req.avatar_url.as_deref(), Some("a.png"));

        let req: InviteMemberRequest = serde_json::from_value(json!({ "teamId": 4 })).unwrap();
        assert!(req.email.is_none());
    }

    #[test]
    fn test_done_response() {
        assert_eq!(
            serde_json::to_value(DoneResponse::done()).unwrap(),
            json!({ "done": 1 })
        );
    }
}
