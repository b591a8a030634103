use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;
use crate::user::errors::UserStatusError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Has no `Serialize` impl; the HTTP layer maps it to a view without the hash.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Drop the password hash before the user leaves the domain.
    pub fn redacted(mut self) -> Self {
        self.password_hash = PasswordHash::redacted();
        self
    }
}

/// Fields the registration flow hands to the repository.
///
/// Identifier and timestamps are assigned by the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub status: UserStatus,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-20 characters. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 20;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 20 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stored password digest (PHC string).
///
/// Never printed; `Debug` shows a placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Empty placeholder carried by users handed out of the domain.
    pub fn redacted() -> Self {
        Self(String::new())
    }

    pub fn is_redacted(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash([REDACTED])")
    }
}

/// Account status; only active accounts may log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for UserStatus {
    type Err = UserStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            other => Err(UserStatusError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(username: Username, email: EmailAddress, password: String) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Command to log in with a username or email plus password.
#[derive(Debug)]
pub struct LoginCommand {
    pub identifier: String,
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: auth::IssuedToken,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds() {
        assert!(Username::new("abc".to_string()).is_ok());
        assert!(Username::new("a".repeat(20)).is_ok());
        assert_eq!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
        assert_eq!(
            Username::new("a".repeat(21)),
            Err(UsernameError::TooLong {
                max: 20,
                actual: 21
            })
        );
    }

    #[test]
    fn test_username_counts_characters() {
        // 3 characters, 6 bytes
        assert!(Username::new("äöü".to_string()).is_ok());
    }

    #[test]
    fn test_username_case_sensitive() {
        let lower = Username::new("alice".to_string()).unwrap();
        let upper = Username::new("Alice".to_string()).unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("alice@x.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!("active".parse::<UserStatus>(), Ok(UserStatus::Active));
        assert_eq!("inactive".parse::<UserStatus>(), Ok(UserStatus::Inactive));
        assert!("banned".parse::<UserStatus>().is_err());
        assert_eq!(UserStatus::default(), UserStatus::Active);
    }

    #[test]
    fn test_password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$argon2id$v=19$secret".to_string());
        assert!(!format!("{:?}", hash).contains("argon2id"));
    }

    #[test]
    fn test_redacted_user() {
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@x.com".to_string()).unwrap(),
            password_hash: PasswordHash::new("$argon2id$hash".to_string()),
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let redacted = user.clone().redacted();
        assert!(redacted.password_hash.is_redacted());
        assert_eq!(redacted.id, user.id);
    }
}
