//! User-level actions shared by the team workflows and the HTTP layer.

mod authenticate;
mod issue_token;
mod provision_user;

pub use authenticate::AuthenticateAction;
pub use issue_token::IssueTokenAction;
pub use provision_user::{ProvisionUserAction, ProvisionedUser};
