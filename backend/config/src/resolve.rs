//! Typed views over a prepared config.
//!
//! These read the values `apply_all_defaults` guarantees and convert raw
//! strings into core types. Callers that skip the defaults step still get
//! the documented defaults.

use std::collections::BTreeMap;

use hireforge_core::{Capability, HireError, Role};

use crate::defaults::*;
use crate::schema::{HireForgeConfig, SeedSession};

/// A protected prefix with its parsed capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub prefix: String,
    pub capability: Capability,
}

impl RouteRule {
    pub fn covers(&self, path: &str) -> bool {
        prefix_covers(&self.prefix, path)
    }
}

/// Segment-aware prefix test: `/admin` covers `/admin` and `/admin/jobs`,
/// not `/administrator`.
///
/// A trailing `/` on the prefix and any query string on the path are
/// ignored, so `/admin?from=gate` is under `/admin`.
pub fn prefix_covers(prefix: &str, path: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    let path = path.split_once('?').map_or(path, |(p, _)| p);
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

impl HireForgeConfig {
    pub fn host(&self) -> &str {
        self.gateway
            .as_ref()
            .and_then(|g| g.host.as_deref())
            .unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.gateway.as_ref().and_then(|g| g.port).unwrap_or(DEFAULT_PORT)
    }

    /// Protected prefixes, falling back to `/admin` → `dashboard:view`.
    pub fn route_rules(&self) -> Result<Vec<RouteRule>, HireError> {
        let routes = self
            .access
            .as_ref()
            .map(|a| a.protected_routes.as_slice())
            .unwrap_or_default();
        if routes.is_empty() {
            return Ok(vec![RouteRule {
                prefix: DEFAULT_PROTECTED_PREFIX.to_string(),
                capability: Capability::DASHBOARD_VIEW,
            }]);
        }
        routes
            .iter()
            .map(|r| {
                let capability = match r.capability.as_deref() {
                    Some(raw) => Capability::parse(raw)?,
                    None => Capability::DASHBOARD_VIEW,
                };
                Ok(RouteRule {
                    prefix: r.prefix.clone(),
                    capability,
                })
            })
            .collect()
    }

    pub fn login_path(&self) -> &str {
        self.access
            .as_ref()
            .and_then(|a| a.login_path.as_deref())
            .unwrap_or(DEFAULT_LOGIN_PATH)
    }

    pub fn unauthorized_path(&self) -> &str {
        self.access
            .as_ref()
            .and_then(|a| a.unauthorized_path.as_deref())
            .unwrap_or(DEFAULT_UNAUTHORIZED_PATH)
    }

    pub fn callback_param(&self) -> &str {
        self.access
            .as_ref()
            .and_then(|a| a.callback_param.as_deref())
            .unwrap_or(DEFAULT_CALLBACK_PARAM)
    }

    /// Role overrides keyed by typed role. Unknown role names are an error.
    pub fn role_overrides(&self) -> Result<BTreeMap<Role, Vec<Capability>>, HireError> {
        let mut out = BTreeMap::new();
        for (name, caps) in self.roles.iter().flatten() {
            let role = Role::parse(name);
            if !role.is_known() {
                return Err(HireError::UnknownRole(name.clone()));
            }
            let caps = caps
                .iter()
                .map(|c| Capability::parse(c))
                .collect::<Result<Vec<_>, _>>()?;
            out.insert(role, caps);
        }
        Ok(out)
    }

    pub fn session_cookie(&self) -> &str {
        self.sessions
            .as_ref()
            .and_then(|s| s.cookie_name.as_deref())
            .unwrap_or(DEFAULT_SESSION_COOKIE)
    }

    pub fn session_ttl_minutes(&self) -> u64 {
        self.sessions
            .as_ref()
            .and_then(|s| s.ttl_minutes)
            .unwrap_or(DEFAULT_SESSION_TTL_MINUTES)
    }

    pub fn seed_sessions(&self) -> &[SeedSession] {
        self.sessions
            .as_ref()
            .map(|s| s.seed.as_slice())
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn log_dir(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.dir.as_deref())
    }
}
