use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::ports::TokenRevocationStore;

/// Process-local token denylist keyed by token id.
///
/// Entries live until the token would have expired anyway; expired entries
/// are swept on every write.
#[derive(Default)]
pub struct InMemoryRevocationStore {
    revoked: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.revoked.read().await.len()
    }
}

#[async_trait]
impl TokenRevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, jti: &str, expires_at: DateTime<Utc>) {
        // Token expiry has whole-second precision and stays valid through
        // its final second.
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write().await;

        revoked.retain(|_, expiry| expiry.timestamp() >= now);
        if expires_at.timestamp() >= now {
            revoked.insert(jti.to_string(), expires_at);
        }
    }

    async fn is_revoked(&self, jti: &str) -> bool {
        self.revoked.read().await.contains_key(jti)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[tokio::test]
    async fn test_revoke_and_check() {
        let store = InMemoryRevocationStore::new();

        store.revoke("a", Utc::now() + Duration::minutes(5)).await;

        assert!(store.is_revoked("a").await);
        assert!(!store.is_revoked("b").await);
    }

    #[tokio::test]
    async fn test_revoke_during_final_second() {
        let store = InMemoryRevocationStore::new();
        let final_second = DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap();

        store.revoke("last", final_second).await;
        store.revoke("other", Utc::now() + Duration::minutes(5)).await;

        assert!(store.is_revoked("last").await);
    }

    #[tokio::test]
    async fn test_expired_entries_are_swept() {
        let store = InMemoryRevocationStore::new();

        store.revoke("stale", Utc::now() - Duration::minutes(1)).await;
        assert!(!store.is_revoked("stale").await);

        store.revoke("live", Utc::now() + Duration::minutes(5)).await;
        assert_eq!(store.len().await, 1);
    }
}
