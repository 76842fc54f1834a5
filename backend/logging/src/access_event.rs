//! Access Event Logger
//!
//! One structured record per gate decision, written through `tracing` on the
//! `access_events` target so it can be routed to its own sink.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessOutcome {
    /// Path is not protected.
    Public,
    Allowed,
    RedirectLogin,
    RedirectUnauthorized,
}

#[derive(Debug, Serialize)]
pub struct AccessEvent {
    pub timestamp: DateTime<Utc>,
    pub path: String,
    pub outcome: AccessOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability: Option<String>,
}

impl AccessEvent {
    pub fn new(path: &str, outcome: AccessOutcome) -> Self {
        Self {
            timestamp: Utc::now(),
            path: redact_sensitive_data(path),
            outcome,
            user_id: None,
            role: None,
            capability: None,
        }
    }

    pub fn with_subject(mut self, user_id: &str, role: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self.role = Some(role.to_string());
        self
    }

    pub fn with_capability(mut self, capability: &str) -> Self {
        self.capability = Some(capability.to_string());
        self
    }

    /// Emit the event. Public pass-throughs are logged at debug to keep the
    /// access stream focused on protected traffic.
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        match self.outcome {
            AccessOutcome::Public => {
                debug!(target: "access_events", event = %json, "Access decision");
            }
            _ => {
                info!(target: "access_events", event = %json, "Access decision");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_outcome_in_snake_case() {
        let event = AccessEvent::new("/admin/jobs", AccessOutcome::RedirectUnauthorized)
            .with_subject("u-9", "FINANCE")
            .with_capability("dashboard:view");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["outcome"], "redirect_unauthorized");
        assert_eq!(value["role"], "FINANCE");
        assert_eq!(value["capability"], "dashboard:view");
    }

    #[test]
    fn omits_absent_subject() {
        let event = AccessEvent::new("/careers", AccessOutcome::Public);
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("user_id").is_none());
        assert!(value.get("role").is_none());
    }
}
