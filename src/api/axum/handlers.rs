//! Billing handlers and request helpers shared with the team handlers.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::Html;

use super::error::AppError;
use super::middleware::AuthenticatedUser;
use super::routes::AppState;
use crate::api::BillingPageQuery;
use crate::billing::{
    BillingPage, BillingProvider, CheckoutSession, InvoiceListResponse, SubscriptionStatus,
};
use crate::teams::TeamRepository;
use crate::{TeamError, TokenRepository, UserRepository};

pub(super) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(inner)| inner)
        .map_err(|rejection| AppError(TeamError::Validation(rejection.body_text())))
}

pub(super) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(inner)| inner)
        .map_err(|rejection| AppError(TeamError::Validation(rejection.body_text())))
}

/// POST /stripe/fetch-checkout-session
pub async fn fetch_checkout_session<U, T, TM, IM, B>(
    State(state): State<AppState<U, T, TM, IM, B>>,
    caller: AuthenticatedUser,
) -> Result<Json<CheckoutSession>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    TM: Clone + Send + Sync + 'static,
    IM: Clone + Send + Sync + 'static,
    B: BillingProvider + Clone + Send + Sync + 'static,
{
    Ok(Json(state.billing.checkout_session(caller.user()).await?))
}

/// POST /cancel-subscription
pub async fn cancel_subscription<U, T, TM, IM, B>(
    State(state): State<AppState<U, T, TM, IM, B>>,
    caller: AuthenticatedUser,
) -> Result<Json<SubscriptionStatus>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    TM: Clone + Send + Sync + 'static,
    IM: Clone + Send + Sync + 'static,
    B: BillingProvider + Clone + Send + Sync + 'static,
{
    Ok(Json(state.billing.cancel_subscription(caller.user()).await?))
}

/// GET /get-list-of-invoices-for-customer
pub async fn list_invoices<U, T, TM, IM, B>(
    State(state): State<AppState<U, T, TM, IM, B>>,
    caller: AuthenticatedUser,
) -> Result<Json<InvoiceListResponse>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    TM: Clone + Send + Sync + 'static,
    IM: Clone + Send + Sync + 'static,
    B: BillingProvider + Clone + Send + Sync + 'static,
{
    Ok(Json(state.billing.list_invoices(caller.user()).await?))
}

/// GET /billing?teamSlug=
///
/// The current team is the team with the requested slug, provided the
/// caller is one of its members.
pub async fn billing_page<U, T, TM, IM, B>(
    State(state): State<AppState<U, T, TM, IM, B>>,
    caller: AuthenticatedUser,
    query: Result<Query<BillingPageQuery>, QueryRejection>,
) -> Result<Html<String>, AppError>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    TM: TeamRepository + Clone + Send + Sync + 'static,
    IM: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    let team_slug = query_params(query)?.team_slug.unwrap_or_default();

    let current_team = if team_slug.is_empty() {
        None
    } else {
        state
            .team_repo
            .find_by_slug(&team_slug)
            .await?
            .filter(|team| team.has_member(caller.id()))
    };

    let page = BillingPage::resolve(caller.user(), current_team.as_ref(), &team_slug);
    Ok(Html(page.to_html()))
}
