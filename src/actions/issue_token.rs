use chrono::Utc;

use crate::config::TokenConfig;
use crate::{IssuedToken, TeamError, TokenRepository};

/// Issues a bearer token for a user. The plain token is only available in
/// the returned [`IssuedToken`].
pub struct IssueTokenAction<T: TokenRepository> {
    token_repo: T,
    config: TokenConfig,
}

impl<T: TokenRepository> IssueTokenAction<T> {
    pub fn new(token_repo: T) -> Self {
        Self::with_config(token_repo, TokenConfig::default())
    }

    pub fn with_config(token_repo: T, config: TokenConfig) -> Self {
        Self { token_repo, config }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "issue_token", skip(self), err)
    )]
    pub async fn execute(&self, user_id: i64) -> Result<IssuedToken, TeamError> {
        let expires_at = Utc::now() + self.config.access_token_expiry;
        let issued = self.token_repo.create_token(user_id, expires_at).await?;

        log::info!(
            target: "teamwork",
            "msg=\"access token issued\", user_id={user_id}, expires_at=\"{}\"",
            expires_at.to_rfc3339()
        );

        Ok(issued)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::MockTokenRepository;

    #[tokio::test]
    async fn test_issue_token() {
        let repo = MockTokenRepository::new();
        let action = IssueTokenAction::new(repo.clone());

        let issued = action.execute(5).await.unwrap();
        let stored = repo
            .find_token(issued.token.expose_secret())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(stored.user_id, 5);
        assert!(!stored.is_expired());
    }

    #[tokio::test]
    async fn test_issue_token_custom_expiry() {
        let action = IssueTokenAction::with_config(
            MockTokenRepository::new(),
            TokenConfig {
                access_token_expiry: Duration::hours(1),
            },
        );

        let issued = action.execute(5).await.unwrap();
        let expected = Utc::now() + Duration::hours(1);
        let diff = (issued.access_token.expires_at - expected)
            .num_seconds()
            .abs();
        assert!(diff < 5, "expiry should be ~1 hour from now");
    }
}
