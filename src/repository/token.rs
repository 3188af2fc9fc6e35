use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{SecretString, TeamError};

/// A stored bearer token. Only the hash of the plain token is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// A freshly created token together with its plain value, which is only
/// available at creation time.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: SecretString,
    pub access_token: AccessToken,
}

#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn create_token(
        &self,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TeamError>;
    /// Looks a token up by its plain value; hashing happens inside.
    async fn find_token(&self, token: &str) -> Result<Option<AccessToken>, TeamError>;
    async fn revoke_token(&self, token: &str) -> Result<(), TeamError>;
}
