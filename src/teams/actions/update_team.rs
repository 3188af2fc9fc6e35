use chrono::Utc;

use crate::TeamError;
use crate::events::{TeamEvent, dispatch};
use crate::slug::{generate_unique_slug, slugify};
use crate::teams::{Team, TeamRepository, UpdateTeam};
use crate::validators::{validate_avatar_url, validate_team_name};

#[derive(Debug, Clone)]
pub struct UpdateTeamInput {
    pub team_id: i64,
    pub name: String,
    pub avatar_url: String,
}

/// Renames a team and replaces its avatar. Leader only.
///
/// A changed name gets a fresh unique slug unless it slugifies to the
/// current one.
pub struct UpdateTeamAction<T: TeamRepository> {
    team_repo: T,
}

impl<T: TeamRepository> UpdateTeamAction<T> {
    pub fn new(team_repo: T) -> Self {
        Self { team_repo }
    }

    /// # Returns
    ///
    /// - `Ok(team)` - the updated team
    /// - `Err(TeamError::Validation(_))` - blank or overlong fields
    /// - `Err(TeamError::NotFound)` - team does not exist
    /// - `Err(TeamError::Forbidden)` - caller is not the team leader
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "update_team", skip(self, input), err)
    )]
    pub async fn execute(&self, caller_id: i64, input: UpdateTeamInput) -> Result<Team, TeamError> {
        validate_team_name(&input.name)?;
        validate_avatar_url(&input.avatar_url)?;

        let team = self
            .team_repo
            .find_by_id(input.team_id)
            .await?
            .ok_or(TeamError::NotFound)?;

        if !team.is_leader(caller_id) {
            return Err(TeamError::Forbidden);
        }

        let name = input.name.trim().to_owned();
        let slug = if name == team.name || slugify(&name) == team.slug {
            team.slug.clone()
        } else {
            let repo = &self.team_repo;
            generate_unique_slug(&name, move |candidate| async move {
                repo.find_by_slug(&candidate).await.map(|t| t.is_some())
            })
            .await?
        };

        let updated = self
            .team_repo
            .update(
                team.id,
                UpdateTeam {
                    name,
                    slug,
                    avatar_url: input.avatar_url.trim().to_owned(),
                },
            )
            .await?;

        log::info!(
            target: "teamwork",
            "msg=\"team updated\", team_id={}, old_slug=\"{}\", slug=\"{}\"",
            updated.id,
            team.slug,
            updated.slug
        );

        dispatch(TeamEvent::TeamUpdated {
            team_id: updated.id,
            slug: updated.slug.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockUserRepository;
    use crate::teams::MockTeamRepository;
    use crate::teams::actions::test_support::{team, user};

    fn input(team_id: i64, name: &str) -> UpdateTeamInput {
        UpdateTeamInput {
            team_id,
            name: name.to_owned(),
            avatar_url: "https://example.com/new.png".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_rename_regenerates_slug() {
        let users = MockUserRepository::new();
        let teams = MockTeamRepository::new();
        let leader = user(&users, "leader@x.com").await;
        let acme = team(&teams, &leader, "acme").await;
        team(&teams, &leader, "globex").await;

        let action = UpdateTeamAction::new(teams);
        let updated = action.execute(leader.id, input(acme.id, "Globex")).await.unwrap();

        assert_eq!(updated.name, "Globex");
        assert_eq!(updated.slug, "globex-1");
        assert_eq!(updated.avatar_url, "https://example.com/new.png");
    }

    #[tokio::test]
    async fn test_same_slug_name_keeps_slug() {
        let users = MockUserRepository::new();
        let teams = MockTeamRepository::new();
        let leader = user(&users, "leader@x.com").await;
        let acme = team(&teams, &leader, "acme").await;

        let action = UpdateTeamAction::new(teams);
        let updated = action.execute(leader.id, input(acme.id, "ACME")).await.unwrap();

        assert_eq!(updated.name, "ACME");
        assert_eq!(updated.slug, "acme");
    }

    #[tokio::test]
    async fn test_missing_team_and_non_leader() {
        let users = MockUserRepository::new();
        let teams = MockTeamRepository::new();
        let leader = user(&users, "leader@x.com").await;
        let other = user(&users, "other@x.com").await;
        let acme = team(&teams, &leader, "acme").await;

        let action = UpdateTeamAction::new(teams.clone());

        assert_eq!(
            action.execute(leader.id, input(999, "Acme")).await.unwrap_err(),
            TeamError::NotFound
        );
        assert_eq!(
            action.execute(other.id, input(acme.id, "Hijacked")).await.unwrap_err(),
            TeamError::Forbidden
        );

        let unchanged = teams.find_by_id(acme.id).await.unwrap().unwrap();
        assert_eq!(unchanged.name, "acme");
    }

    #[tokio::test]
    async fn test_rejects_blank_name() {
        let teams = MockTeamRepository::new();
        let action = UpdateTeamAction::new(teams);

        let result = action.execute(1, input(1, "")).await;
        assert!(matches!(result, Err(TeamError::Validation(_))));
    }
}
