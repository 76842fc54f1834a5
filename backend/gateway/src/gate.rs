//! Route Authorization Gate.
//!
//! Decides, per request, whether to pass through, send the caller to the
//! login flow, or send them to the unauthorized page. The decision is a
//! pure function of the path, the injected session and two pieces of
//! immutable data (the policy and the permission registry), so the same
//! inputs always produce the same decision.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hireforge_config::{HireForgeConfig, RouteRule};
use hireforge_core::{Capability, HireError, Session};
use hireforge_security::PermissionRegistry;

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Hand the request to the next handler unchanged.
    Allow,
    /// No usable session on a protected path.
    RedirectLogin { location: String },
    /// Session present but its role lacks the required capability.
    RedirectUnauthorized { location: String },
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Redirect target, if this is a redirect.
    pub fn location(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::RedirectLogin { location } | Decision::RedirectUnauthorized { location } => {
                Some(location)
            }
        }
    }
}

/// Static access policy: protected prefixes and redirect targets.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    /// Longest prefix first, so the most specific rule wins.
    rules: Vec<RouteRule>,
    login_path: String,
    unauthorized_path: String,
    callback_param: String,
}

impl Default for AccessPolicy {
    /// `/admin` requires `dashboard:view`; redirects go to `/login` and
    /// `/unauthorized`.
    fn default() -> Self {
        Self::new(
            vec![RouteRule {
                prefix: "/admin".to_string(),
                capability: Capability::DASHBOARD_VIEW,
            }],
            "/login",
            "/unauthorized",
            "callbackUrl",
        )
    }
}

impl AccessPolicy {
    pub fn new(
        rules: Vec<RouteRule>,
        login_path: impl Into<String>,
        unauthorized_path: impl Into<String>,
        callback_param: impl Into<String>,
    ) -> Self {
        let mut rules: Vec<RouteRule> = rules
            .into_iter()
            .map(|mut rule| {
                let trimmed = rule.prefix.trim_end_matches('/');
                rule.prefix = if trimmed.is_empty() {
                    "/".to_string()
                } else {
                    trimmed.to_string()
                };
                rule
            })
            .collect();
        rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self {
            rules,
            login_path: login_path.into(),
            unauthorized_path: unauthorized_path.into(),
            callback_param: callback_param.into(),
        }
    }

    pub fn from_config(config: &HireForgeConfig) -> Result<Self, HireError> {
        Ok(Self::new(
            config.route_rules()?,
            config.login_path(),
            config.unauthorized_path(),
            config.callback_param(),
        ))
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// The most specific rule covering `path`, if any.
    ///
    /// Matching is per path segment: `/admin` covers `/admin` and
    /// `/admin/jobs`, not `/administrator`.
    pub fn protected_rule(&self, path: &str) -> Option<&RouteRule> {
        self.rules.iter().find(|rule| rule.covers(path))
    }

    /// The login route, without any query string it was configured with.
    pub fn login_path(&self) -> &str {
        self.login_path.split('?').next().unwrap_or(&self.login_path)
    }

    /// `/login?callbackUrl=<percent-encoded path>`.
    pub fn login_location(&self, requested_path: &str) -> String {
        let separator = if self.login_path.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            self.login_path,
            separator,
            self.callback_param,
            urlencoding::encode(requested_path)
        )
    }

    pub fn unauthorized_location(&self) -> &str {
        &self.unauthorized_path
    }
}

/// The gate itself: policy + registry, both shared read-only.
#[derive(Debug, Clone)]
pub struct AccessGate {
    policy: Arc<AccessPolicy>,
    registry: Arc<PermissionRegistry>,
}

impl AccessGate {
    pub fn new(policy: AccessPolicy, registry: PermissionRegistry) -> Self {
        Self {
            policy: Arc::new(policy),
            registry: Arc::new(registry),
        }
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn registry(&self) -> &PermissionRegistry {
        &self.registry
    }

    /// Evaluate one request against the current time.
    pub fn decide(&self, path: &str, session: Option<&Session>) -> Decision {
        self.decide_at(path, session, Utc::now())
    }

    /// Evaluate one request as of `now`.
    ///
    /// A session with no identity, or one that expired at or before `now`,
    /// is treated exactly like no session.
    pub fn decide_at(
        &self,
        path: &str,
        session: Option<&Session>,
        now: DateTime<Utc>,
    ) -> Decision {
        let Some(rule) = self.policy.protected_rule(path) else {
            return Decision::Allow;
        };

        let usable = |s: &&Session| s.is_well_formed() && !s.is_expired_at(now);
        let Some(session) = session.filter(usable) else {
            return Decision::RedirectLogin {
                location: self.policy.login_location(path),
            };
        };

        if self
            .registry
            .has_permission(session.role, rule.capability.as_str())
        {
            Decision::Allow
        } else {
            Decision::RedirectUnauthorized {
                location: self.policy.unauthorized_location().to_string(),
            }
        }
    }
}
