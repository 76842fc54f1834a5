//! Capability tokens: `resource:action` strings naming a permitted action.

use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HireError;

/// A permission token such as `dashboard:view`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    /// Required to enter the admin area at all.
    pub const DASHBOARD_VIEW: Capability = Capability::from_static("dashboard:view");
    pub const JOBS_VIEW: Capability = Capability::from_static("jobs:view");
    pub const JOBS_MANAGE: Capability = Capability::from_static("jobs:manage");
    pub const CANDIDATES_VIEW: Capability = Capability::from_static("candidates:view");
    pub const CANDIDATES_MANAGE: Capability = Capability::from_static("candidates:manage");
    pub const APPLICATIONS_VIEW: Capability = Capability::from_static("applications:view");
    pub const APPLICATIONS_MANAGE: Capability = Capability::from_static("applications:manage");
    pub const INTERVIEWS_VIEW: Capability = Capability::from_static("interviews:view");
    pub const INTERVIEWS_MANAGE: Capability = Capability::from_static("interviews:manage");
    pub const EMPLOYEES_VIEW: Capability = Capability::from_static("employees:view");
    pub const EMPLOYEES_MANAGE: Capability = Capability::from_static("employees:manage");
    pub const DEPARTMENTS_VIEW: Capability = Capability::from_static("departments:view");
    pub const DEPARTMENTS_MANAGE: Capability = Capability::from_static("departments:manage");
    pub const FORMS_MANAGE: Capability = Capability::from_static("forms:manage");
    pub const REPORTS_VIEW: Capability = Capability::from_static("reports:view");
    pub const USERS_MANAGE: Capability = Capability::from_static("users:manage");
    pub const SETTINGS_MANAGE: Capability = Capability::from_static("settings:manage");

    /// Wrap a static token without validation. Intended for constants.
    pub const fn from_static(token: &'static str) -> Self {
        Capability(Cow::Borrowed(token))
    }

    /// Parse and validate a token from configuration or user input.
    pub fn parse(raw: &str) -> Result<Self, HireError> {
        let token = raw.trim();
        if !is_well_formed(token) {
            return Err(HireError::InvalidCapability(raw.to_string()));
        }
        Ok(Capability(Cow::Owned(token.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the colon, e.g. `dashboard`.
    pub fn resource(&self) -> &str {
        self.0.split_once(':').map(|(r, _)| r).unwrap_or(&self.0)
    }

    /// The part after the colon, e.g. `view`.
    pub fn action(&self) -> &str {
        self.0.split_once(':').map(|(_, a)| a).unwrap_or("")
    }
}

/// `resource:action`, both halves non-empty and made of `[a-z0-9_-]`.
pub fn is_well_formed(token: &str) -> bool {
    let Some((resource, action)) = token.split_once(':') else {
        return false;
    };
    let valid = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    };
    valid(resource) && valid(action)
}

impl Borrow<str> for Capability {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parses_well_formed_tokens() {
        let cap = Capability::parse("dashboard:view").unwrap();
        assert_eq!(cap, Capability::DASHBOARD_VIEW);
        assert_eq!(cap.resource(), "dashboard");
        assert_eq!(cap.action(), "view");
    }

    #[test]
    fn rejects_malformed_tokens() {
        for bad in ["dashboard", ":view", "dashboard:", "Dashboard:View", "a:b:c", "jobs view"] {
            assert!(Capability::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn set_lookup_by_str() {
        let set: HashSet<Capability> = [Capability::JOBS_VIEW].into_iter().collect();
        assert!(set.contains("jobs:view"));
        assert!(!set.contains("jobs:manage"));
    }
}
