//! The authenticated session as seen by the route gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Proof of authentication: who the caller is and which role they hold.
///
/// Owned by the authentication subsystem. The gate only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            issued_at: None,
            expires_at: None,
        }
    }

    /// A session without an expiry never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(false)
    }

    /// A session with an empty user id carries no identity and is not usable.
    pub fn is_well_formed(&self) -> bool {
        !self.user_id.trim().is_empty()
    }
}
