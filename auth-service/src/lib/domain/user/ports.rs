use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// Created user with the password hash redacted
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Internal` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError>;

    /// Authenticate by username or email and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong password
    /// * `AccountInactive` - Account is not active
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError>;

    /// Acknowledge a logout.
    ///
    /// Revokes the presented token when revocation is enabled; otherwise the
    /// client simply discards it.
    async fn logout(&self, token: &str);

    /// Exchange a valid token for a new one with a fresh expiry.
    ///
    /// # Errors
    /// * `TokenExpired` - Token lifetime has elapsed
    /// * `TokenInvalid` - Token is malformed, forged, revoked, or its subject is gone
    /// * `AccountInactive` - Subject account is not active
    async fn refresh(&self, token: &str) -> Result<auth::IssuedToken, UserError>;

    /// Validate a bearer token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token lifetime has elapsed
    /// * `TokenInvalid` - Token is malformed, forged or revoked
    async fn authenticate(&self, token: &str) -> Result<auth::Claims, UserError>;

    /// Retrieve the user a token belongs to.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn current_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Whether a username is still free.
    async fn is_username_available(&self, username: &Username) -> Result<bool, UserError>;

    /// Whether an email address is still free.
    async fn is_email_available(&self, email: &EmailAddress) -> Result<bool, UserError>;
}

/// Persistence operations for user aggregate.
///
/// Implementations must enforce uniqueness of username and email at the
/// storage level; `create` is the source of truth for conflicts.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - Fields of the user to create
    ///
    /// # Returns
    /// Created user entity with identifier and timestamps assigned
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user whose username or email equals `identifier`.
    ///
    /// A username match takes precedence over an email match.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username_or_email(&self, identifier: &str)
        -> Result<Option<User>, UserError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError>;
}

/// Denylist of tokens revoked before their natural expiry.
#[async_trait]
pub trait TokenRevocationStore: Send + Sync + 'static {
    /// Remember `jti` as revoked until `expires_at`.
    async fn revoke(&self, jti: &str, expires_at: DateTime<Utc>);

    async fn is_revoked(&self, jti: &str) -> bool;
}
