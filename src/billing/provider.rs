use async_trait::async_trait;
use serde::Serialize;

use crate::{TeamError, User};

pub const PLACEHOLDER_SESSION_ID: &str = "placeholder-session-id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatus {
    pub is_subscription_active: bool,
}

/// Provider-style list envelope; keys stay snake case on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceList {
    pub object: String,
    pub data: Vec<serde_json::Value>,
    pub has_more: bool,
}

impl InvoiceList {
    pub fn empty() -> Self {
        Self {
            object: "list".to_owned(),
            data: Vec::new(),
            has_more: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceListResponse {
    pub stripe_list_of_invoices: InvoiceList,
}

/// Payment operations available to a team leader.
#[async_trait]
pub trait BillingProvider: Send + Sync {
    async fn checkout_session(&self, customer: &User) -> Result<CheckoutSession, TeamError>;
    async fn cancel_subscription(&self, customer: &User) -> Result<SubscriptionStatus, TeamError>;
    async fn list_invoices(&self, customer: &User) -> Result<InvoiceListResponse, TeamError>;
}

/// Stand-in used until billing is configured. Stateless; ignores its input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingBillingProvider;

#[async_trait]
impl BillingProvider for PendingBillingProvider {
    async fn checkout_session(&self, customer: &User) -> Result<CheckoutSession, TeamError> {
        log::debug!(
            target: "teamwork",
            "msg=\"billing pending, placeholder checkout session\", user_id={}",
            customer.id
        );
        Ok(CheckoutSession {
            session_id: PLACEHOLDER_SESSION_ID.to_owned(),
        })
    }

    async fn cancel_subscription(&self, customer: &User) -> Result<SubscriptionStatus, TeamError> {
        log::debug!(
            target: "teamwork",
            "msg=\"billing pending, nothing to cancel\", user_id={}",
            customer.id
        );
        Ok(SubscriptionStatus {
            is_subscription_active: false,
        })
    }

    async fn list_invoices(&self, _customer: &User) -> Result<InvoiceListResponse, TeamError> {
        Ok(InvoiceListResponse {
            stripe_list_of_invoices: InvoiceList::empty(),
        })
    }
}
