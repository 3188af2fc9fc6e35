use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::TeamError;

/// A user profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// Unique across users.
    pub email: String,
    /// Unique across users, derived from the email.
    pub slug: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    /// Slug of the team the user lands on; empty when none.
    pub default_team_slug: String,
    pub is_signedup_via_google: bool,
    pub dark_theme: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn has_default_team(&self) -> bool {
        !self.default_team_slug.is_empty()
    }
}

/// Fields needed to insert a user. Flags start out false and the default
/// team slug empty.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub slug: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub is_signedup_via_google: bool,
}

/// The subset of [`User`] that is safe to hand to other team members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub slug: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub default_team_slug: String,
    pub is_signedup_via_google: bool,
    pub dark_theme: bool,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            slug: user.slug,
            display_name: user.display_name,
            avatar_url: user.avatar_url,
            default_team_slug: user.default_team_slug,
            is_signedup_via_google: user.is_signedup_via_google,
            dark_theme: user.dark_theme,
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, TeamError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, TeamError>;
    async fn find_user_by_slug(&self, slug: &str) -> Result<Option<User>, TeamError>;
    /// Fails with [`TeamError::UserAlreadyExists`] when the email or slug is taken.
    async fn create_user(&self, data: CreateUser) -> Result<User, TeamError>;
    async fn set_default_team_slug(&self, user_id: i64, slug: &str) -> Result<(), TeamError>;
}
