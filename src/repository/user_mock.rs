use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use super::user::{CreateUser, User, UserRepository};
use crate::TeamError;

/// In-memory [`UserRepository`]. Clones share the same storage.
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<Vec<User>>>,
    next_id: Arc<AtomicI64>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.read().map(|u| u.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> TeamError {
    TeamError::Internal("lock poisoned".into())
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, TeamError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, TeamError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_slug(&self, slug: &str) -> Result<Option<User>, TeamError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.slug == slug).cloned())
    }

    async fn create_user(&self, data: CreateUser) -> Result<User, TeamError> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users
            .iter()
            .any(|u| u.email == data.email || u.slug == data.slug)
        {
            return Err(TeamError::UserAlreadyExists);
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            email: data.email,
            slug: data.slug,
            display_name: data.display_name,
            avatar_url: data.avatar_url,
            default_team_slug: String::new(),
            is_signedup_via_google: data.is_signedup_via_google,
            dark_theme: false,
            created_at: Utc::now(),
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn set_default_team_slug(&self, user_id: i64, slug: &str) -> Result<(), TeamError> {
        let mut users = self.users.write().map_err(poisoned)?;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(TeamError::NotFound)?;
        slug.clone_into(&mut user.default_team_slug);
        Ok(())
    }
}
