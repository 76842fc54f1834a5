//! HireForge runtime configuration schema.
//!
//! Typed for serde YAML/JSON deserialization. Every section is optional;
//! `defaults::apply_all_defaults` fills in what the file leaves out.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for HireForge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HireForgeConfig {
    /// HTTP server configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<GatewayConfig>,

    /// Protected prefixes and redirect targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<AccessConfig>,

    /// Per-role capability overrides, keyed by role wire name (`HR_STAFF`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<BTreeMap<String, Vec<String>>>,

    /// Session lookup settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions: Option<SessionsConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

// ---------------------------------------------------------------------------
// Access
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessConfig {
    /// Path prefixes requiring a session and a capability
    #[serde(default)]
    pub protected_routes: Vec<ProtectedRoute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unauthorized_path: Option<String>,

    /// Query parameter carrying the originally requested path to the login flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_param: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedRoute {
    pub prefix: String,

    /// Capability needed to enter; defaults to `dashboard:view`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability: Option<String>,
}

// ---------------------------------------------------------------------------
// Sessions, Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,

    /// Lifetime of sessions issued by the built-in store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_minutes: Option<u64>,

    /// Fixed sessions loaded at startup (development only)
    #[serde(default)]
    pub seed: Vec<SeedSession>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSession {
    pub token: String,
    pub user_id: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    /// Directory for rolling log files; unset disables file output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_yaml() {
        let yaml = r#"
gateway:
  port: 9090
access:
  protectedRoutes:
    - prefix: /admin
    - prefix: /admin/settings
      capability: settings:manage
  loginPath: /signin
roles:
  FINANCE: ["dashboard:view", "reports:view"]
sessions:
  cookieName: sid
  seed:
    - token: dev-token
      userId: u-1
      role: VIEWER
logging:
  level: debug
"#;
        let cfg: HireForgeConfig = serde_yaml::from_str(yaml).unwrap();
        let access = cfg.access.unwrap();
        assert_eq!(access.protected_routes.len(), 2);
        assert_eq!(access.protected_routes[1].capability.as_deref(), Some("settings:manage"));
        assert_eq!(access.login_path.as_deref(), Some("/signin"));
        assert_eq!(cfg.roles.unwrap()["FINANCE"].len(), 2);
        assert_eq!(cfg.sessions.unwrap().seed[0].role, "VIEWER");
        assert_eq!(cfg.gateway.unwrap().port, Some(9090));
    }

    #[test]
    fn empty_document_is_default() {
        let cfg: HireForgeConfig = serde_yaml::from_str("{}").unwrap();
        assert!(cfg.access.is_none());
        assert!(cfg.roles.is_none());
    }
}
