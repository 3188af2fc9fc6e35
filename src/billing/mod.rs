//! Billing placeholder.
//!
//! No payment provider is wired in. [`BillingProvider`] is the seam a real
//! integration would implement; [`PendingBillingProvider`] answers every
//! call with a fixed "nothing configured" payload. [`BillingPage`] renders
//! the matching server-side page.

mod page;
mod provider;

pub use page::{BILLING_PENDING_NOTICE, BillingPage};
pub use provider::{
    BillingProvider, CheckoutSession, InvoiceList, InvoiceListResponse, PendingBillingProvider,
    SubscriptionStatus,
};
