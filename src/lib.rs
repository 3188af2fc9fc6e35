//! Team membership, invitations and billing placeholders for multi-tenant
//! SaaS backends.
//!
//! The crate is organised around repository traits ([`UserRepository`],
//! [`TokenRepository`], [`teams::TeamRepository`],
//! [`teams::InvitationRepository`]) and action structs that implement the
//! team workflows on top of them. Storage backends and the HTTP layer are
//! feature-gated:
//!
//! | Feature | Provides |
//! |---------|----------|
//! | `mocks` | In-memory repositories for tests and demos |
//! | `sqlx_sqlite` | `SQLite` repositories and migrations |
//! | `axum_api` | Axum routes, handlers and the bearer-token extractor |
//! | `tracing` | `tracing` spans on actions and repositories |

use std::fmt;

pub mod actions;
pub mod billing;
pub mod config;
pub mod crypto;
pub mod events;
pub mod repository;
pub mod slug;
pub mod teams;
pub mod validators;

pub mod api;

#[cfg(feature = "sqlx_sqlite")]
pub mod sqlite;

pub use config::TeamworkConfig;
pub use crypto::SecretString;
pub use events::{dispatch, register_event_listeners};
pub use repository::{
    AccessToken, CreateUser, IssuedToken, PublicUser, TokenRepository, User, UserRepository,
};

#[cfg(any(test, feature = "mocks"))]
pub use repository::{MockTokenRepository, MockUserRepository};

/// Errors produced by team workflows and repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamError {
    /// A required field was missing or malformed.
    Validation(String),
    /// The requested record does not exist.
    NotFound,
    /// The caller may not perform the operation (usually: not the team leader).
    Forbidden,
    /// The user is already part of the team's member set.
    AlreadyMember,
    /// A user with the same email or slug is already stored.
    UserAlreadyExists,
    /// No valid caller identity was presented.
    Unauthorized,
    DatabaseError(String),
    Internal(String),
}

impl std::error::Error for TeamError {}

impl fmt::Display for TeamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "Bad data: {msg}"),
            Self::NotFound => write!(f, "Not found"),
            Self::Forbidden => write!(f, "Team does not exist or you have no permission"),
            Self::AlreadyMember => write!(f, "This user is already a Team Member."),
            Self::UserAlreadyExists => write!(f, "User already exists"),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl From<validators::ValidationError> for TeamError {
    fn from(err: validators::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(TeamError::Unauthorized.to_string(), "Unauthorized");
        assert_eq!(
            TeamError::AlreadyMember.to_string(),
            "This user is already a Team Member."
        );
        assert_eq!(
            TeamError::Validation("teamId is required".to_owned()).to_string(),
            "Bad data: teamId is required"
        );
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: TeamError = validators::ValidationError::EmailEmpty.into();
        assert!(matches!(err, TeamError::Validation(_)));
    }
}
