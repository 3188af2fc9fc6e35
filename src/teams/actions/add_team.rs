use chrono::Utc;

use crate::events::{TeamEvent, dispatch};
use crate::slug::generate_unique_slug;
use crate::teams::{CreateTeam, Team, TeamRepository};
use crate::validators::{validate_avatar_url, validate_team_name};
use crate::{TeamError, UserRepository};

#[derive(Debug, Clone)]
pub struct AddTeamInput {
    pub name: String,
    pub avatar_url: String,
}

/// Creates a team led by the caller.
///
/// The slug is derived from the name and made unique among teams. The
/// caller's first team becomes their default team: it is flagged
/// `is_default_team` and its slug is written to the caller's profile.
pub struct AddTeamAction<T: TeamRepository, U: UserRepository> {
    team_repo: T,
    user_repo: U,
}

impl<T: TeamRepository, U: UserRepository> AddTeamAction<T, U> {
    pub fn new(team_repo: T, user_repo: U) -> Self {
        Self {
            team_repo,
            user_repo,
        }
    }

    /// # Returns
    ///
    /// - `Ok(team)` - the stored team, member set `[caller_id]`
    /// - `Err(TeamError::Validation(_))` - blank name or avatar URL, or a
    ///   name longer than 100 characters
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "add_team", skip(self, input), err)
    )]
    pub async fn execute(&self, caller_id: i64, input: AddTeamInput) -> Result<Team, TeamError> {
        validate_team_name(&input.name)?;
        validate_avatar_url(&input.avatar_url)?;

        let name = input.name.trim().to_owned();

        let repo = &self.team_repo;
        let slug = generate_unique_slug(&name, move |candidate| async move {
            repo.find_by_slug(&candidate).await.map(|team| team.is_some())
        })
        .await?;

        let is_default_team = self.team_repo.count_by_leader(caller_id).await? == 0;

        let team = self
            .team_repo
            .create(CreateTeam {
                team_leader_id: caller_id,
                name,
                slug,
                avatar_url: input.avatar_url.trim().to_owned(),
                is_default_team,
            })
            .await?;

        if is_default_team {
            self.user_repo
                .set_default_team_slug(caller_id, &team.slug)
                .await?;
        }

        log::info!(
            target: "teamwork",
            "msg=\"team created\", team_id={}, team_leader_id={}, slug=\"{}\", is_default_team={}",
            team.id,
            team.team_leader_id,
            team.slug,
            team.is_default_team
        );

        dispatch(TeamEvent::TeamCreated {
            team_id: team.id,
            team_leader_id: team.team_leader_id,
            slug: team.slug.clone(),
            at: Utc::now(),
        })
        .await;

        Ok(team)
    }
}
