use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for UserStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserStatusError {
    #[error("Unknown user status: {0}")]
    Unknown(String),
}

/// Top-level error for all user and authentication operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] UserStatusError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account inactive")]
    AccountInactive,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token")]
    TokenInvalid,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<auth::JwtError> for UserError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::TokenExpired => UserError::TokenExpired,
            auth::JwtError::TokenInvalid(_) => UserError::TokenInvalid,
            auth::JwtError::EncodingFailed(msg) => {
                UserError::Internal(format!("Token generation failed: {}", msg))
            }
        }
    }
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        UserError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_failures_share_message() {
        assert_eq!(UserError::InvalidCredentials.to_string(), "invalid credentials");
        assert_eq!(UserError::AccountInactive.to_string(), "account inactive");
    }

    #[test]
    fn test_jwt_error_classification() {
        assert!(matches!(
            UserError::from(auth::JwtError::TokenExpired),
            UserError::TokenExpired
        ));
        assert!(matches!(
            UserError::from(auth::JwtError::TokenInvalid("bad signature".into())),
            UserError::TokenInvalid
        ));
        assert!(matches!(
            UserError::from(auth::JwtError::EncodingFailed("boom".into())),
            UserError::Internal(_)
        ));
    }
}
