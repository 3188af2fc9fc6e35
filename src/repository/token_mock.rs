use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::token::{AccessToken, IssuedToken, TokenRepository};
use crate::crypto::{generate_token_default, hash_token};
use crate::{SecretString, TeamError};

#[derive(Clone, Default)]
pub struct MockTokenRepository {
    tokens: Arc<Mutex<Vec<AccessToken>>>,
}

impl MockTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn create_token(
        &self,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TeamError> {
        let plain = generate_token_default();
        let access_token = AccessToken {
            token_hash: hash_token(&plain),
            user_id,
            expires_at,
            created_at: Utc::now(),
        };

        self.tokens
            .lock()
            .map_err(|_| TeamError::Internal("lock poisoned".into()))?
            .push(access_token.clone());

        Ok(IssuedToken {
            token: SecretString::new(plain),
            access_token,
        })
    }

    async fn find_token(&self, token: &str) -> Result<Option<AccessToken>, TeamError> {
        let hashed = hash_token(token);
        let tokens = self
            .tokens
            .lock()
            .map_err(|_| TeamError::Internal("lock poisoned".into()))?;
        Ok(tokens.iter().find(|t| t.token_hash == hashed).cloned())
    }

    async fn revoke_token(&self, token: &str) -> Result<(), TeamError> {
        let hashed = hash_token(token);
        self.tokens
            .lock()
            .map_err(|_| TeamError::Internal("lock poisoned".into()))?
            .retain(|t| t.token_hash != hashed);
        Ok(())
    }
}
