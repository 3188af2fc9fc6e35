use chrono::Utc;

use crate::events::{TeamEvent, dispatch};
use crate::slug::generate_unique_slug;
use crate::validators::validate_email;
use crate::{CreateUser, TeamError, User, UserRepository};

/// Result of [`ProvisionUserAction::execute`].
#[derive(Debug, Clone)]
pub struct ProvisionedUser {
    pub user: User,
    /// `false` when a user with the email already existed.
    pub created: bool,
}

/// Finds the user registered under an email, creating a bare profile when
/// there is none.
///
/// New users get a unique slug derived from the email, the email's local
/// part as display name, no default team and all flags off. Running the
/// action twice for the same email yields the same user.
pub struct ProvisionUserAction<U: UserRepository> {
    user_repo: U,
}

impl<U: UserRepository> ProvisionUserAction<U> {
    pub fn new(user_repo: U) -> Self {
        Self { user_repo }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "provision_user", skip_all, err)
    )]
    pub async fn execute(&self, email: &str) -> Result<ProvisionedUser, TeamError> {
        validate_email(email)?;

        if let Some(user) = self.user_repo.find_user_by_email(email).await? {
            return Ok(ProvisionedUser {
                user,
                created: false,
            });
        }

        let repo = &self.user_repo;
        let slug = generate_unique_slug(email, move |candidate| async move {
            repo.find_user_by_slug(&candidate)
                .await
                .map(|user| user.is_some())
        })
        .await?;

        let data = CreateUser {
            email: email.to_owned(),
            slug,
            display_name: display_name_from_email(email),
            avatar_url: None,
            is_signedup_via_google: false,
        };

        let user = match self.user_repo.create_user(data).await {
            Ok(user) => user,
            // another request provisioned the same email in between
            Err(TeamError::UserAlreadyExists) => {
                let user = self
                    .user_repo
                    .find_user_by_email(email)
                    .await?
                    .ok_or(TeamError::UserAlreadyExists)?;
                return Ok(ProvisionedUser {
                    user,
                    created: false,
                });
            }
            Err(err) => return Err(err),
        };

        log::info!(
            target: "teamwork",
            "msg=\"user provisioned\", user_id={}, slug=\"{}\"",
            user.id,
            user.slug
        );

        dispatch(TeamEvent::UserProvisioned {
            user_id: user.id,
            email: user.email.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(ProvisionedUser {
            user,
            created: true,
        })
    }
}

fn display_name_from_email(email: &str) -> String {
    email
        .split_once('@')
        .map_or(email, |(local, _)| local)
        .to_owned()
}
