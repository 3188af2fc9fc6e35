//! Axum routes for the team-leader API.
//!
//! ```rust,ignore
//! use axum::Router;
//! use teamwork::api::axum::{AppState, team_leader_routes};
//!
//! let app = Router::new()
//!     .nest("/api/v1/team-leader", team_leader_routes())
//!     .with_state(state);
//! ```

mod error;
mod handlers;
mod middleware;
mod routes;

pub mod teams;

pub use error::AppError;
pub use middleware::{AuthenticatedUser, extract_bearer_token};
pub use routes::{AppState, team_leader_routes};
