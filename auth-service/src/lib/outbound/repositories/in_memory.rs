use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserStatus;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Uniqueness is checked and the insert performed under one write lock, so
/// concurrent registrations of the same name see exactly one winner.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Administrative status change; not part of the repository port.
    pub async fn set_status(&self, id: &UserId, status: UserStatus) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        user.status = status;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let now = Utc::now();
        let created = User {
            id: UserId::new(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            status: user.status,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        let found = users
            .iter()
            .find(|u| u.username.as_str() == identifier)
            .or_else(|| users.iter().find(|u| u.email.as_str() == identifier));

        Ok(found.cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| &u.username == username))
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| &u.email == email))
    }
}
