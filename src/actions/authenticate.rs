use crate::{TeamError, TokenRepository, User, UserRepository};

/// Resolves a plain bearer token to its user.
///
/// Unknown tokens, expired tokens and tokens whose user no longer exists
/// all fail with [`TeamError::Unauthorized`].
pub struct AuthenticateAction<U: UserRepository, T: TokenRepository> {
    user_repo: U,
    token_repo: T,
}

impl<U: UserRepository, T: TokenRepository> AuthenticateAction<U, T> {
    pub fn new(user_repo: U, token_repo: T) -> Self {
        Self {
            user_repo,
            token_repo,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "authenticate", skip_all, err)
    )]
    pub async fn execute(&self, token: &str) -> Result<User, TeamError> {
        let access_token = self
            .token_repo
            .find_token(token)
            .await?
            .ok_or(TeamError::Unauthorized)?;

        if access_token.is_expired() {
            log::debug!(
                target: "teamwork",
                "msg=\"expired token rejected\", user_id={}",
                access_token.user_id
            );
            return Err(TeamError::Unauthorized);
        }

        self.user_repo
            .find_user_by_id(access_token.user_id)
            .await?
            .ok_or(TeamError::Unauthorized)
    }
}
