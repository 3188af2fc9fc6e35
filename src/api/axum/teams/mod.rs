//! Team management endpoints, mounted under `/teams` by
//! [`team_leader_routes`](super::team_leader_routes).

mod handlers;
mod routes;

pub use routes::teams_routes;
