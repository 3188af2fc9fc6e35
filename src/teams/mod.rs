//! Teams, their member sets and invitation receipts.
//!
//! Every workflow takes the caller's user id explicitly and checks it
//! against the team leader before mutating anything.

mod actions;
mod repository;
mod types;

pub use actions::{
    AddTeamAction, AddTeamInput, GetTeamInvitationsAction, InviteMemberAction, InviteMemberInput,
    InviteMemberOutput, PruneExpiredInvitationsAction, RemoveMemberAction, RemoveMemberInput,
    UpdateTeamAction, UpdateTeamInput,
};
pub use repository::{
    CreateInvitation, CreateTeam, InvitationRepository, TeamRepository, UpdateTeam,
};
pub use types::{Invitation, Team};

#[cfg(any(test, feature = "mocks"))]
mod mocks;

#[cfg(any(test, feature = "mocks"))]
pub use mocks::{MockInvitationRepository, MockTeamRepository};
