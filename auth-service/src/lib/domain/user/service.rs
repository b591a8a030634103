use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PasswordHash;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserStatus;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::TokenRevocationStore;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration, login and token lifecycle.
///
/// Holds no mutable state of its own; all writes go through the repository
/// (and the revocation store when one is configured).
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    revocations: Option<Arc<dyn TokenRevocationStore>>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token issuer
    ///
    /// # Returns
    /// Stateless service: logout is a plain acknowledgement
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
            revocations: None,
        }
    }

    /// Enable server-side revocation: logout and refresh put the presented
    /// token on the denylist until it expires.
    pub fn with_revocation_store(mut self, store: Arc<dyn TokenRevocationStore>) -> Self {
        self.revocations = Some(store);
        self
    }

    async fn hash_password(&self, password: String) -> Result<PasswordHash, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Internal(format!("Hashing task failed: {}", e)))?
            .map(PasswordHash::new)
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                UserError::from(e)
            })
    }

    async fn validate_bearer(&self, token: &str) -> Result<auth::Claims, UserError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            UserError::from(e)
        })?;

        if let Some(store) = &self.revocations {
            if store.is_revoked(&claims.jti).await {
                tracing::debug!(subject = %claims.sub, "Token rejected: revoked");
                return Err(UserError::TokenInvalid);
            }
        }

        Ok(claims)
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        // Fast-path checks; `create` remains the authority on uniqueness.
        if self.repository.exists_by_username(&command.username).await? {
            tracing::warn!(username = %command.username, "Registration rejected: username taken");
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        if self.repository.exists_by_email(&command.email).await? {
            tracing::warn!(username = %command.username, "Registration rejected: email taken");
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let new_user = NewUser {
            username: command.username,
            email: command.email,
            password_hash,
            status: UserStatus::Active,
        };

        let created_user = self.repository.create(new_user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user.redacted())
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError> {
        let Some(user) = self
            .repository
            .find_by_username_or_email(&command.identifier)
            .await?
        else {
            let authenticator = Arc::clone(&self.authenticator);
            let password = command.password;

            tokio::task::spawn_blocking(move || authenticator.reject_unknown(&password))
                .await
                .map_err(|e| UserError::Internal(format!("Verification task failed: {}", e)))?;

            tracing::warn!("Login rejected: unknown identifier");
            return Err(UserError::InvalidCredentials);
        };

        if !user.is_active() {
            tracing::warn!(user_id = %user.id, status = %user.status, "Login rejected: account inactive");
            return Err(UserError::AccountInactive);
        }

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.as_str().to_string();
        let subject = user.id.to_string();
        let password = command.password;

        let token = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, subject)
        })
        .await
        .map_err(|e| UserError::Internal(format!("Verification task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
                UserError::InvalidCredentials
            }
            AuthenticationError::JwtError(err) => {
                tracing::error!(error = %err, "Token generation failed");
                UserError::from(err)
            }
        })?;

        tracing::info!(user_id = %user.id, expires_at = %token.expires_at, "User logged in");

        Ok(LoginOutcome {
            token,
            user: user.redacted(),
        })
    }

    async fn logout(&self, token: &str) {
        let Some(store) = &self.revocations else {
            tracing::debug!("Logout acknowledged; token left to expire");
            return;
        };

        match self.authenticator.validate_token(token) {
            Ok(claims) => {
                store.revoke(&claims.jti, claims.expires_at()).await;
                tracing::info!(subject = %claims.sub, "Token revoked on logout");
            }
            Err(e) => tracing::debug!(error = %e, "Logout with unusable token ignored"),
        }
    }

    async fn refresh(&self, token: &str) -> Result<auth::IssuedToken, UserError> {
        let claims = self.validate_bearer(token).await?;

        let user_id = UserId::from_string(&claims.sub).map_err(|_| UserError::TokenInvalid)?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(UserError::TokenInvalid)?;

        if !user.is_active() {
            tracing::warn!(user_id = %user.id, "Refresh rejected: account inactive");
            return Err(UserError::AccountInactive);
        }

        let issued = self.authenticator.issue_token(user.id)?;

        if let Some(store) = &self.revocations {
            store.revoke(&claims.jti, claims.expires_at()).await;
        }

        tracing::info!(user_id = %user.id, expires_at = %issued.expires_at, "Token refreshed");

        Ok(issued)
    }

    async fn authenticate(&self, token: &str) -> Result<auth::Claims, UserError> {
        self.validate_bearer(token).await
    }

    async fn current_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(User::redacted)
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn is_username_available(&self, username: &Username) -> Result<bool, UserError> {
        Ok(!self.repository.exists_by_username(username).await?)
    }

    async fn is_email_available(&self, email: &EmailAddress) -> Result<bool, UserError> {
        Ok(!self.repository.exists_by_email(email).await?)
    }
}
