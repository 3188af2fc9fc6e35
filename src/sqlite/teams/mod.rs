mod invitation;
mod team;

pub use invitation::SqliteInvitationRepository;
pub use team::SqliteTeamRepository;
