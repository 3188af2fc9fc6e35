use axum::Router;
use axum::routing::{get, post};

use super::handlers;
use crate::api::axum::AppState;
use crate::teams::{InvitationRepository, TeamRepository};
use crate::{TokenRepository, UserRepository};

/// Team routes, relative to the `/teams` mount point.
///
/// - `POST /add` - Create a team led by the caller
/// - `POST /update` - Rename a team and replace its avatar
/// - `GET /get-invitations-for-team?teamId=` - List unexpired invitations
/// - `POST /invite-member` - Add a user to the team by email
/// - `POST /remove-member` - Remove a member
pub fn teams_routes<U, T, TM, IM, B>() -> Router<AppState<U, T, TM, IM, B>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    TM: TeamRepository + Clone + Send + Sync + 'static,
    IM: InvitationRepository + Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/add", post(handlers::add_team::<U, T, TM, IM, B>))
        .route("/update", post(handlers::update_team::<U, T, TM, IM, B>))
        .route(
            "/get-invitations-for-team",
            get(handlers::get_invitations_for_team::<U, T, TM, IM, B>),
        )
        .route(
            "/invite-member",
            post(handlers::invite_member::<U, T, TM, IM, B>),
        )
        .route(
            "/remove-member",
            post(handlers::remove_member::<U, T, TM, IM, B>),
        )
}
