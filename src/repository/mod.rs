//! User and access-token storage abstractions.
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`UserRepository`] | User lookup, creation and default-team updates |
//! | [`TokenRepository`] | Bearer token issuance and lookup |
//!
//! Enable the `mocks` feature for in-memory implementations:
//! [`MockUserRepository`] and [`MockTokenRepository`].

mod token;
mod user;

#[cfg(any(test, feature = "mocks"))]
mod token_mock;
#[cfg(any(test, feature = "mocks"))]
mod user_mock;

pub use token::{AccessToken, IssuedToken, TokenRepository};
pub use user::{CreateUser, PublicUser, User, UserRepository};

#[cfg(any(test, feature = "mocks"))]
pub use token_mock::MockTokenRepository;
#[cfg(any(test, feature = "mocks"))]
pub use user_mock::MockUserRepository;
