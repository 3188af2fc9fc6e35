use axum::Router;
use axum::routing::{get, post};

use super::handlers;
use super::middleware::log_request;
use super::teams::teams_routes;
use crate::billing::BillingProvider;
use crate::config::TeamworkConfig;
use crate::teams::{InvitationRepository, TeamRepository};
use crate::{TokenRepository, UserRepository};

/// Shared handles for the team-leader handlers.
#[derive(Clone)]
pub struct AppState<U, T, TM, IM, B> {
    pub user_repo: U,
    pub token_repo: T,
    pub team_repo: TM,
    pub invitation_repo: IM,
    pub billing: B,
    pub config: TeamworkConfig,
}

/// Team-leader routes. Every route requires a bearer token.
///
/// - `POST /teams/add`
/// - `POST /teams/update`
/// - `GET /teams/get-invitations-for-team?teamId=`
/// - `POST /teams/invite-member`
/// - `POST /teams/remove-member`
/// - `POST /stripe/fetch-checkout-session`
/// - `POST /cancel-subscription`
/// - `GET /get-list-of-invoices-for-customer`
/// - `GET /billing?teamSlug=` (HTML)
pub fn team_leader_routes<U, T, TM, IM, B>() -> Router<AppState<U, T, TM, IM, B>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    TM: TeamRepository + Clone + Send + Sync + 'static,
    IM: InvitationRepository + Clone + Send + Sync + 'static,
    B: BillingProvider + Clone + Send + Sync + 'static,
{
    Router::new()
        .nest("/teams", teams_routes::<U, T, TM, IM, B>())
        .route(
            "/stripe/fetch-checkout-session",
            post(handlers::fetch_checkout_session::<U, T, TM, IM, B>),
        )
        .route(
            "/cancel-subscription",
            post(handlers::cancel_subscription::<U, T, TM, IM, B>),
        )
        .route(
            "/get-list-of-invoices-for-customer",
            get(handlers::list_invoices::<U, T, TM, IM, B>),
        )
        .route("/billing", get(handlers::billing_page::<U, T, TM, IM, B>))
        .layer(axum::middleware::from_fn(log_request))
}
