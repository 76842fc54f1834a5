//! Config validation: deep schema checks with user-friendly error messages.

use hireforge_core::{capability, Role};
use thiserror::Error;

use crate::resolve::prefix_covers;
use crate::schema::HireForgeConfig;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &HireForgeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_gateway(config, &mut report);
    validate_access(config, &mut report);
    validate_roles(config, &mut report);
    validate_sessions(config, &mut report);
    report
}

/// Served by the gateway itself.
const HEALTH_PATH: &str = "/api/health";

fn validate_gateway(config: &HireForgeConfig, report: &mut ValidationReport) {
    let Some(gw) = &config.gateway else { return };
    if let Some(port) = gw.port {
        if port == 0 {
            report.error("gateway.port", "Port must be > 0");
        } else if port < 1024 && port != 80 && port != 443 {
            report.warn(
                "gateway.port",
                format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
            );
        }
    }
}

fn validate_access(config: &HireForgeConfig, report: &mut ValidationReport) {
    let Some(access) = &config.access else { return };

    for (i, route) in access.protected_routes.iter().enumerate() {
        let path = format!("access.protectedRoutes[{i}]");
        if !route.prefix.starts_with('/') {
            report.error(
                format!("{path}.prefix"),
                format!("Prefix '{}' must start with '/'", route.prefix),
            );
        }
        if route.prefix.trim_end_matches('/').is_empty() {
            report.warn(
                format!("{path}.prefix"),
                "Prefix '/' protects every path, including public pages",
            );
        }
        if let Some(cap) = &route.capability {
            if !capability::is_well_formed(cap) {
                report.error(
                    format!("{path}.capability"),
                    format!("Capability '{cap}' must look like 'resource:action'"),
                );
            }
        }
    }

    let targets = [
        ("access.loginPath", access.login_path.as_deref()),
        ("access.unauthorizedPath", access.unauthorized_path.as_deref()),
    ];
    for (field, target) in targets {
        let Some(target) = target else { continue };
        if !target.starts_with('/') {
            report.error(field, format!("Redirect target '{target}' must be an absolute path"));
            continue;
        }
        if access.protected_routes.iter().any(|r| prefix_covers(&r.prefix, target)) {
            report.error(
                field,
                format!("Redirect target '{target}' is itself protected and would loop"),
            );
        }
    }

    let login = access.login_path.as_deref().map(|p| p.split('?').next().unwrap_or(p));
    if login.is_some() && login == access.unauthorized_path.as_deref() {
        report.error(
            "access.unauthorizedPath",
            "Login and unauthorized redirect targets must differ",
        );
    }
    for (field, target) in [
        ("access.loginPath", login),
        ("access.unauthorizedPath", access.unauthorized_path.as_deref()),
    ] {
        if target == Some(HEALTH_PATH) {
            report.error(field, format!("'{HEALTH_PATH}' is reserved for the health probe"));
        }
    }

    if let Some(param) = &access.callback_param {
        if param.trim().is_empty() {
            report.error("access.callbackParam", "Callback parameter name cannot be empty");
        }
    }
}

fn validate_roles(config: &HireForgeConfig, report: &mut ValidationReport) {
    let Some(roles) = &config.roles else { return };
    for (name, caps) in roles {
        let path = format!("roles.{name}");
        if !Role::parse(name).is_known() {
            report.error(&path, format!("Unknown role '{name}'"));
            continue;
        }
        if caps.is_empty() {
            report.warn(&path, "Role override grants no capabilities");
        }
        for cap in caps {
            if !capability::is_well_formed(cap) {
                report.error(
                    &path,
                    format!("Capability '{cap}' must look like 'resource:action'"),
                );
            }
        }
    }
}

fn validate_sessions(config: &HireForgeConfig, report: &mut ValidationReport) {
    let Some(sessions) = &config.sessions else { return };
    if let Some(cookie) = &sessions.cookie_name {
        if cookie.trim().is_empty() || cookie.contains(['=', ';', ' ']) {
            report.error("sessions.cookieName", format!("Invalid cookie name '{cookie}'"));
        }
    }
    if sessions.ttl_minutes == Some(0) {
        report.error("sessions.ttlMinutes", "ttlMinutes must be >= 1");
    }
    if !sessions.seed.is_empty() {
        report.warn("sessions.seed", "Seeded sessions are for development only");
    }
    for (i, seed) in sessions.seed.iter().enumerate() {
        let path = format!("sessions.seed[{i}]");
        if seed.token.trim().is_empty() {
            report.error(format!("{path}.token"), "Token cannot be empty");
        }
        if seed.user_id.trim().is_empty() {
            report.error(format!("{path}.userId"), "userId cannot be empty");
        }
        if !Role::parse(&seed.role).is_known() {
            report.warn(
                format!("{path}.role"),
                format!("Unknown role '{}'; this session will hold no capabilities", seed.role),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::apply_all_defaults;
    use crate::schema::{AccessConfig, ProtectedRoute};
    use std::collections::BTreeMap;

    #[test]
    fn default_config_is_valid() {
        let report = validate(&apply_all_defaults(HireForgeConfig::default()));
        assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    #[test]
    fn prefix_without_leading_slash_is_error() {
        let mut cfg = HireForgeConfig::default();
        cfg.access = Some(AccessConfig {
            protected_routes: vec![ProtectedRoute { prefix: "admin".into(), capability: None }],
            ..Default::default()
        });
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert!(report.errors[0].path.contains("prefix"));
    }

    #[test]
    fn protected_login_path_is_a_loop() {
        let mut cfg = HireForgeConfig::default();
        cfg.access = Some(AccessConfig {
            protected_routes: vec![ProtectedRoute { prefix: "/admin".into(), capability: None }],
            login_path: Some("/admin/login".into()),
            ..Default::default()
        });
        let report = validate(&cfg);
        assert!(report.errors.iter().any(|e| e.path == "access.loginPath"));
    }

    #[test]
    fn protected_login_path_with_query_is_a_loop() {
        let mut cfg = HireForgeConfig::default();
        cfg.access = Some(AccessConfig {
            protected_routes: vec![ProtectedRoute { prefix: "/admin".into(), capability: None }],
            login_path: Some("/admin?from=gate".into()),
            ..Default::default()
        });
        let report = validate(&cfg);
        assert!(
            report.errors.iter().any(|e| e.path == "access.loginPath"),
            "errors: {:?}",
            report.errors
        );
    }

    #[test]
    fn sibling_path_is_not_a_loop() {
        let mut cfg = HireForgeConfig::default();
        cfg.access = Some(AccessConfig {
            protected_routes: vec![ProtectedRoute { prefix: "/admin".into(), capability: None }],
            unauthorized_path: Some("/administrator-help".into()),
            ..Default::default()
        });
        assert!(validate(&cfg).is_valid());
    }

    #[test]
    fn identical_redirect_targets_are_error() {
        let mut cfg = HireForgeConfig::default();
        cfg.access = Some(AccessConfig {
            login_path: Some("/signin?via=sso".into()),
            unauthorized_path: Some("/signin".into()),
            ..Default::default()
        });
        let report = validate(&cfg);
        assert!(report.errors.iter().any(|e| e.path == "access.unauthorizedPath"));
    }

    #[test]
    fn unknown_role_and_bad_capability_are_errors() {
        let mut roles = BTreeMap::new();
        roles.insert("JANITOR".to_string(), vec!["dashboard:view".to_string()]);
        roles.insert("FINANCE".to_string(), vec!["Reports".to_string()]);
        let cfg = HireForgeConfig { roles: Some(roles), ..Default::default() };
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors.iter().any(|e| e.path == "roles.JANITOR"));
        assert!(report.errors.iter().any(|e| e.path == "roles.FINANCE"));
    }
}
