use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// A signed token together with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates short-lived bearer tokens.
///
/// Holds the signing secret and TTL; both are fixed for the lifetime of the
/// issuer.
pub struct TokenIssuer {
    handler: JwtHandler,
    ttl: Duration,
}

impl TokenIssuer {
    pub const DEFAULT_TTL_MINUTES: i64 = 15;

    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            ttl,
        }
    }

    /// Issue a token for `subject`, valid from now for the configured TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: impl ToString) -> Result<IssuedToken, JwtError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_at(
        &self,
        subject: impl ToString,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_subject(subject, now, self.ttl);
        let token = self.handler.encode(&claims)?;

        Ok(IssuedToken {
            token,
            expires_at: claims.expires_at(),
        })
    }

    /// Verify signature and expiry and return the claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token lifetime has elapsed
    /// * `TokenInvalid` - Signature, algorithm or claims are wrong
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let claims: Claims = self.handler.decode(token)?;

        if claims.exp <= claims.iat {
            return Err(JwtError::TokenInvalid(
                "expiry is not after issue time".to_string(),
            ));
        }

        Ok(claims)
    }
}
