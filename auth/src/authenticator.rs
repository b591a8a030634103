use chrono::DateTime;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Built once at startup and shared read-only between requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Configured hasher (cost factor already applied)
    /// * `token_issuer` - Configured issuer (secret and TTL already applied)
    pub fn new(password_hasher: PasswordHasher, token_issuer: TokenIssuer) -> Self {
        Self {
            password_hasher,
            token_issuer,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Spend one password verification without a stored hash.
    ///
    /// Called when no account matches, so the miss takes as long as a
    /// wrong password.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        self.password_hasher.verify_decoy(password);
        AuthenticationError::InvalidCredentials
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_issuer.issue(subject)?)
    }

    /// Issue a token without password verification.
    ///
    /// Used by refresh, where the caller already holds a valid token.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: impl ToString) -> Result<IssuedToken, JwtError> {
        self.token_issuer.issue(subject)
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token_at(
        &self,
        subject: impl ToString,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        self.token_issuer.issue_at(subject, now)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `TokenExpired` - Token lifetime has elapsed
    /// * `TokenInvalid` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.token_issuer.validate(token)
    }
}
