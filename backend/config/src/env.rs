//! Environment overrides for the handful of settings operators change per host.
//!
//! | Variable | Field |
//! |---|---|
//! | `HIREFORGE_HOST` | `gateway.host` |
//! | `HIREFORGE_PORT` | `gateway.port` |
//! | `HIREFORGE_LOG_LEVEL` | `logging.level` |
//! | `HIREFORGE_PROTECTED_PREFIXES` | `access.protectedRoutes` (comma separated) |

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::schema::{AccessConfig, GatewayConfig, HireForgeConfig, LoggingConfig, ProtectedRoute};

/// An override variable was set to a value its field cannot hold.
#[derive(Debug, Error)]
#[error("Invalid value {value:?} for env var {var_name}: {reason}")]
pub struct InvalidEnvOverride {
    pub var_name: String,
    pub value: String,
    pub reason: String,
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: HireForgeConfig) -> Result<HireForgeConfig, InvalidEnvOverride> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
///
/// Empty values are treated as unset.
pub fn apply_env_overrides_with(
    mut config: HireForgeConfig,
    env: &HashMap<String, String>,
) -> Result<HireForgeConfig, InvalidEnvOverride> {
    let get = |name: &str| env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(host) = get("HIREFORGE_HOST") {
        debug!(host, "HIREFORGE_HOST override");
        config.gateway.get_or_insert_with(GatewayConfig::default).host = Some(host.to_string());
    }

    if let Some(raw) = get("HIREFORGE_PORT") {
        let port: u16 = raw.parse().map_err(|_| InvalidEnvOverride {
            var_name: "HIREFORGE_PORT".to_string(),
            value: raw.to_string(),
            reason: "expected a port number".to_string(),
        })?;
        debug!(port, "HIREFORGE_PORT override");
        config.gateway.get_or_insert_with(GatewayConfig::default).port = Some(port);
    }

    if let Some(level) = get("HIREFORGE_LOG_LEVEL") {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level.to_string());
    }

    if let Some(raw) = get("HIREFORGE_PROTECTED_PREFIXES") {
        let routes: Vec<ProtectedRoute> = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|prefix| ProtectedRoute {
                prefix: prefix.to_string(),
                capability: None,
            })
            .collect();
        debug!(count = routes.len(), "HIREFORGE_PROTECTED_PREFIXES override");
        config
            .access
            .get_or_insert_with(AccessConfig::default)
            .protected_routes = routes;
    }

    Ok(config)
}
