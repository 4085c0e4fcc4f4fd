//! In-memory auth sessions for web login.
//!
//! Tokens are opaque UUIDs mapped to an expiry time. Sessions live only for
//! the process lifetime; a restart logs everyone out, which is acceptable
//! for a single-operator tool.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Default session lifetime (matches the 2-hour client session timeout)
const SESSION_HOURS: i64 = 2;

pub struct SessionStore {
    sessions: DashMap<String, DateTime<Utc>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(SESSION_HOURS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Issue a new session token.
    pub fn issue(&self) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), Utc::now() + self.ttl);
        token
    }

    /// Check a token, dropping it if expired.
    pub fn validate(&self, token: &str) -> bool {
        // Guard must be released before remove() to avoid a shard deadlock
        let valid = match self.sessions.get(token) {
            Some(expires_at) => *expires_at > Utc::now(),
            None => return false,
        };
        if !valid {
            self.sessions.remove(token);
        }
        valid
    }

    /// Delete a session (logout). Returns whether the token existed.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_validate() {
        let store = SessionStore::new();
        let token = store.issue();
        assert!(store.validate(&token));
        assert!(!store.validate("not-a-token"));
    }

    #[test]
    fn test_expired_token_rejected_and_removed() {
        let store = SessionStore::with_ttl(Duration::seconds(-1));
        let token = store.issue();
        assert!(!store.validate(&token));
        // Second check: the entry is gone, not just expired
        assert!(!store.revoke(&token));
    }

    #[test]
    fn test_revoke() {
        let store = SessionStore::new();
        let token = store.issue();
        assert!(store.revoke(&token));
        assert!(!store.validate(&token));
        assert!(!store.revoke(&token));
    }
}
