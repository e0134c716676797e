use crate::accesso::identity::User;
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::RngCore;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

/// Server side record binding an opaque token to an authenticated identity.
///
/// A session exists iff a successful authentication has occurred and neither
/// logout nor expiry has happened since.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
    pub created_at: Instant,
}

impl Session {
    fn expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// In-memory token to session map. Cloning hands out another handle to the
/// same store. The store owns the expiry policy, callers only ever see
/// `Some(session)` or `None`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    ttl: Duration,
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a session bound to `user` under a fresh opaque token. Sweeps
    /// expired entries while holding the write lock, keeping the map bounded
    /// by the number of live sessions.
    pub async fn create(&self, user: &User) -> Session {
        let session = Session {
            token: new_token(),
            user: user.clone(),
            created_at: Instant::now(),
        };

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, existing| !existing.expired(self.ttl));
        sessions.insert(session.token.clone(), session.clone());

        session
    }

    /// Look up an active session, evicting it first if it has expired.
    pub async fn get(&self, token: &str) -> Option<Session> {
        let session = self.sessions.read().await.get(token).cloned()?;

        if session.expired(self.ttl) {
            self.sessions.write().await.remove(token);
            return None;
        }

        Some(session)
    }

    /// Destroy a session. Destroying a token with no session is not an error,
    /// the result only says whether something was removed.
    pub async fn destroy(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Number of active sessions. Expired entries are swept first, an entry
    /// that outlived the ttl never counts even when nobody presented its
    /// token again.
    pub async fn len(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| !session.expired(self.ttl));
        sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

// 256 bits from the OS generator, url-safe base64 without padding.
fn new_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    Base64UrlUnpadded::encode_string(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new(Duration::from_secs(60));
        let session = store.create(&user("alice")).await;

        let found = store.get(&session.token).await;
        assert_eq!(found.map(|s| s.user.username), Some("alice".to_string()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let store = SessionStore::new(Duration::from_secs(60));
        let first = store.create(&user("alice")).await;
        let second = store.create(&user("alice")).await;

        assert_ne!(first.token, second.token);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_destroy_is_idempotent() {
        let store = SessionStore::new(Duration::from_secs(60));
        let session = store.create(&user("alice")).await;

        assert!(store.destroy(&session.token).await);
        assert!(!store.destroy(&session.token).await);
        assert!(store.get(&session.token).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert!(store.get("no-such-token").await.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_evicted() {
        let store = SessionStore::new(Duration::ZERO);
        let session = store.create(&user("alice")).await;

        tokio::time::sleep(Duration::from_millis(5)).await;

        assert!(store.get(&session.token).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_sessions_do_not_count_as_active() {
        let store = SessionStore::new(Duration::ZERO);
        store.create(&user("alice")).await;

        tokio::time::sleep(Duration::from_millis(5)).await;

        // Count without ever presenting the token again
        assert_eq!(store.len().await, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_sweeps_expired_sessions() {
        let store = SessionStore::new(Duration::ZERO);
        store.create(&user("alice")).await;
        store.create(&user("alice")).await;

        tokio::time::sleep(Duration::from_millis(5)).await;

        let live = store.create(&user("bob")).await;
        assert_eq!(store.sessions.read().await.len(), 1);
        assert!(store.sessions.read().await.contains_key(&live.token));
    }
}
