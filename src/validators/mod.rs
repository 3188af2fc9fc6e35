mod email;
mod name;

pub use email::validate_email;
pub use name::{validate_avatar_url, validate_team_name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmailEmpty,
    EmailTooLong,
    EmailInvalidFormat,
    TeamNameEmpty,
    TeamNameTooLong,
    AvatarUrlEmpty,
    MissingField(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmailEmpty => write!(f, "email cannot be empty"),
            Self::EmailTooLong => write!(f, "email is too long (max 254 characters)"),
            Self::EmailInvalidFormat => write!(f, "invalid email format"),
            Self::TeamNameEmpty => write!(f, "team name cannot be empty"),
            Self::TeamNameTooLong => write!(f, "team name is too long (max 100 characters)"),
            Self::AvatarUrlEmpty => write!(f, "avatarUrl cannot be empty"),
            Self::MissingField(field) => write!(f, "{field} is required"),
        }
    }
}

impl std::error::Error for ValidationError {}
