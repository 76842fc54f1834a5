//! Session resolution.
//!
//! The gate never reaches into ambient state for the caller's session; the
//! middleware asks an injected [`SessionResolver`] and passes the result in.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use hireforge_core::{Role, Session};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::GateError;

/// Turns request headers into the caller's session, if any.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// `Ok(None)` for anonymous callers. `Err` only for backend faults.
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Session>, GateError>;
}

/// Extract the session token: the named cookie first, then a Bearer header.
pub fn extract_token<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    cookie_token(headers, cookie_name).or_else(|| bearer_token(headers))
}

fn cookie_token<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

/// The auth scheme is matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}

/// Ten years; keeps `now + ttl` far from the end of chrono's range.
const MAX_TTL_MINUTES: u64 = 60 * 24 * 365 * 10;

/// In-memory token → session store.
///
/// Stands in for the authentication subsystem during development and in
/// tests. Cheap to clone; clones share the same map.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    cookie_name: String,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(cookie_name: impl Into<String>, ttl_minutes: u64) -> Self {
        let ttl_minutes = ttl_minutes.min(MAX_TTL_MINUTES) as i64;
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            cookie_name: cookie_name.into(),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Create a session and return its token.
    pub async fn issue(&self, user_id: impl Into<String>, role: Role) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let session = Session {
            user_id: user_id.into(),
            role,
            issued_at: Some(now),
            expires_at: Some(now + self.ttl),
        };
        self.sessions.write().await.insert(token.clone(), session);
        token
    }

    /// Register a session under a fixed token, without expiry.
    pub async fn insert(&self, token: impl Into<String>, session: Session) {
        self.sessions.write().await.insert(token.into(), session);
    }

    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop every expired session. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        before - sessions.len()
    }

    pub async fn lookup(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(token)?;
        if session.is_expired_at(Utc::now()) {
            debug!(user_id = %session.user_id, "Session expired");
            return None;
        }
        Some(session.clone())
    }
}

#[async_trait]
impl SessionResolver for SessionStore {
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Session>, GateError> {
        let Some(token) = extract_token(headers, &self.cookie_name) else {
            return Ok(None);
        };
        Ok(self.lookup(token).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn reads_named_cookie() {
        let h = headers(&[(header::COOKIE, "theme=dark; sid=abc; other=1")]);
        assert_eq!(extract_token(&h, "sid"), Some("abc"));
        assert_eq!(extract_token(&h, "missing"), None);
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let h = headers(&[
            (header::COOKIE, "sid=from-cookie"),
            (header::AUTHORIZATION, "Bearer from-header"),
        ]);
        assert_eq!(extract_token(&h, "sid"), Some("from-cookie"));
        assert_eq!(extract_token(&h, "other"), Some("from-header"));
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        for value in ["bearer tok-1", "BEARER tok-1", "Bearer   tok-1"] {
            let h = headers(&[(header::AUTHORIZATION, value)]);
            assert_eq!(extract_token(&h, "sid"), Some("tok-1"), "{value}");
        }
        let h = headers(&[(header::AUTHORIZATION, "Basic dXNlcjpwdw==")]);
        assert_eq!(extract_token(&h, "sid"), None);
    }

    #[test]
    fn empty_values_are_no_token() {
        let h = headers(&[(header::COOKIE, "sid="), (header::AUTHORIZATION, "Bearer  ")]);
        assert_eq!(extract_token(&h, "sid"), None);
    }

    #[tokio::test]
    async fn issued_session_resolves_from_cookie() {
        let store = SessionStore::new("sid", 60);
        let token = store.issue("u-1", Role::Recruiter).await;
        let cookie = format!("sid={token}");
        let h = headers(&[(header::COOKIE, cookie.as_str())]);
        let session = store.resolve(&h).await.unwrap().unwrap();
        assert_eq!(session.user_id, "u-1");
        assert_eq!(session.role, Role::Recruiter);
    }

    #[tokio::test]
    async fn revoked_and_unknown_tokens_resolve_to_none() {
        let store = SessionStore::new("sid", 60);
        let token = store.issue("u-1", Role::Viewer).await;
        assert!(store.revoke(&token).await);
        assert!(store.lookup(&token).await.is_none());
        assert!(store.lookup("made-up").await.is_none());
    }

    #[tokio::test]
    async fn expired_sessions_resolve_to_none_and_purge() {
        let store = SessionStore::new("sid", 60);
        let mut session = Session::new("u-9", Role::HrStaff);
        session.expires_at = Some(Utc::now() - Duration::minutes(1));
        store.insert("old", session).await;
        store.insert("fixed", Session::new("u-10", Role::Viewer)).await;

        assert!(store.lookup("old").await.is_none());
        assert!(store.lookup("fixed").await.is_some());
        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.revoke("fixed").await);
        assert!(store.is_empty().await);
    }
}
