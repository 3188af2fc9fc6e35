//! Handlers for the `/teams` endpoints.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};

use super::super::error::AppError;
use super::super::handlers::{json_body, query_params};
use super::super::middleware::AuthenticatedUser;
use super::super::routes::AppState;
use crate::api::{
    AddTeamRequest, DoneResponse, InvitationSummary, InvitationsResponse, InviteMemberRequest,
    InviteMemberResponse, RemoveMemberRequest, TeamIdQuery, TeamResponse, UpdateTeamRequest,
    required,
};
use crate::teams::{
    AddTeamAction, AddTeamInput, GetTeamInvitationsAction, InvitationRepository,
    InviteMemberAction, InviteMemberInput, RemoveMemberAction, RemoveMemberInput,
    TeamRepository, UpdateTeamAction, UpdateTeamInput,
};
use crate::{TokenRepository, UserRepository};

/// POST /teams/add
pub async fn add_team<U, T, TM, IM, B>(
    State(state): State<AppState<U, T, TM, IM, B>>,
    caller: AuthenticatedUser,
    body: Result<Json<AddTeamRequest>, JsonRejection>,
) -> Result<Json<TeamResponse>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    TM: TeamRepository + Clone + Send + Sync + 'static,
    IM: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    let body = json_body(body)?;
    let input = AddTeamInput {
        name: required(body.name, "name")?,
        avatar_url: required(body.avatar_url, "avatarUrl")?,
    };

    let action = AddTeamAction::new(state.team_repo, state.user_repo);
    let team = action.execute(caller.id(), input).await?;

    Ok(Json(team.into()))
}

/// POST /teams/update
pub async fn update_team<U, T, TM, IM, B>(
    State(state): State<AppState<U, T, TM, IM, B>>,
    caller: AuthenticatedUser,
    body: Result<Json<UpdateTeamRequest>, JsonRejection>,
) -> Result<Json<TeamResponse>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    TM: TeamRepository + Clone + Send + Sync + 'static,
    IM: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    let body = json_body(body)?;
    let input = UpdateTeamInput {
        team_id: required(body.team_id, "teamId")?,
        name: required(body.name, "name")?,
        avatar_url: required(body.avatar_url, "avatarUrl")?,
    };

    let action = UpdateTeamAction::new(state.team_repo);
    let team = action.execute(caller.id(), input).await?;

    Ok(Json(team.into()))
}

/// GET /teams/get-invitations-for-team?teamId=
pub async fn get_invitations_for_team<U, T, TM, IM, B>(
    State(state): State<AppState<U, T, TM, IM, B>>,
    caller: AuthenticatedUser,
    query: Result<Query<TeamIdQuery>, QueryRejection>,
) -> Result<Json<InvitationsResponse>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    TM: TeamRepository + Clone + Send + Sync + 'static,
    IM: InvitationRepository + Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    let team_id = required(query_params(query)?.team_id, "teamId")?;

    let action = GetTeamInvitationsAction::new(state.team_repo, state.invitation_repo);
    let invitations = action.execute(caller.id(), team_id).await?;

    Ok(Json(InvitationsResponse {
        invitations: invitations.into_iter().map(InvitationSummary::from).collect(),
    }))
}

/// POST /teams/invite-member
pub async fn invite_member<U, T, TM, IM, B>(
    State(state): State<AppState<U, T, TM, IM, B>>,
    caller: AuthenticatedUser,
    body: Result<Json<InviteMemberRequest>, JsonRejection>,
) -> Result<Json<InviteMemberResponse>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    TM: TeamRepository + Clone + Send + Sync + 'static,
    IM: InvitationRepository + Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    let body = json_body(body)?;
    let input = InviteMemberInput {
        team_id: required(body.team_id, "teamId")?,
        email: required(body.email, "email")?,
    };

    let action = InviteMemberAction::with_config(
        state.team_repo,
        state.user_repo,
        state.invitation_repo,
        state.config.invitations,
    );
    let output = action.execute(caller.id(), input).await?;

    Ok(Json(InviteMemberResponse {
        user: output.user,
        team: output.team.into(),
    }))
}

/// POST /teams/remove-member
pub async fn remove_member<U, T, TM, IM, B>(
    State(state): State<AppState<U, T, TM, IM, B>>,
    caller: AuthenticatedUser,
    body: Result<Json<RemoveMemberRequest>, JsonRejection>,
) -> Result<Json<DoneResponse>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    TM: TeamRepository + Clone + Send + Sync + 'static,
    IM: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    let body = json_body(body)?;
    let input = RemoveMemberInput {
        team_id: required(body.team_id, "teamId")?,
        user_id: required(body.user_id, "userId")?,
    };

    RemoveMemberAction::new(state.team_repo)
        .execute(caller.id(), input)
        .await?;

    Ok(Json(DoneResponse::done()))
}
