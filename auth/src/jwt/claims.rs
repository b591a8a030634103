use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by an access token.
///
/// All fields are required; a token missing any of them does not decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Token identifier, used to revoke a single token
    pub jti: String,
}

impl Claims {
    /// Build claims for `subject` issued at `now` and valid for `ttl`.
    pub fn for_subject(subject: impl ToString, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let now = Utc::now();
        let claims = Claims::for_subject("user123", now, Duration::minutes(15));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_unique_jti() {
        let now = Utc::now();
        let a = Claims::for_subject("user123", now, Duration::minutes(15));
        let b = Claims::for_subject("user123", now, Duration::minutes(15));
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_expires_at() {
        let claims = Claims {
            sub: "user123".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_000_900,
            jti: "id".to_string(),
        };

        assert_eq!(claims.expires_at().timestamp(), 1_700_000_900);
    }
}
