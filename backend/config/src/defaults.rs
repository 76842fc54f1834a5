//! Config defaults: applies default values to parsed config.

use crate::schema::{
    AccessConfig, GatewayConfig, HireForgeConfig, LoggingConfig, ProtectedRoute, SessionsConfig,
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// The admin area.
pub const DEFAULT_PROTECTED_PREFIX: &str = "/admin";

/// Capability needed to enter a protected prefix that names none.
pub const DEFAULT_REQUIRED_CAPABILITY: &str = "dashboard:view";

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/unauthorized";
pub const DEFAULT_CALLBACK_PARAM: &str = "callbackUrl";

pub const DEFAULT_SESSION_COOKIE: &str = "hireforge_session";
pub const DEFAULT_SESSION_TTL_MINUTES: u64 = 8 * 60;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: HireForgeConfig) -> HireForgeConfig {
    let config = apply_gateway_defaults(config);
    let config = apply_access_defaults(config);
    let config = apply_session_defaults(config);
    apply_logging_defaults(config)
}

fn apply_gateway_defaults(mut config: HireForgeConfig) -> HireForgeConfig {
    let gateway = config.gateway.get_or_insert_with(GatewayConfig::default);
    if gateway.host.is_none() {
        gateway.host = Some(DEFAULT_HOST.to_string());
    }
    if gateway.port.is_none() {
        gateway.port = Some(DEFAULT_PORT);
    }
    config
}

/// An empty route list falls back to the admin area; routes without a
/// capability require `dashboard:view`.
fn apply_access_defaults(mut config: HireForgeConfig) -> HireForgeConfig {
    let access = config.access.get_or_insert_with(AccessConfig::default);
    if access.protected_routes.is_empty() {
        access.protected_routes.push(ProtectedRoute {
            prefix: DEFAULT_PROTECTED_PREFIX.to_string(),
            capability: None,
        });
    }
    for route in &mut access.protected_routes {
        if route.capability.is_none() {
            route.capability = Some(DEFAULT_REQUIRED_CAPABILITY.to_string());
        }
    }
    if access.login_path.is_none() {
        access.login_path = Some(DEFAULT_LOGIN_PATH.to_string());
    }
    if access.unauthorized_path.is_none() {
        access.unauthorized_path = Some(DEFAULT_UNAUTHORIZED_PATH.to_string());
    }
    if access.callback_param.is_none() {
        access.callback_param = Some(DEFAULT_CALLBACK_PARAM.to_string());
    }
    config
}

fn apply_session_defaults(mut config: HireForgeConfig) -> HireForgeConfig {
    let sessions = config.sessions.get_or_insert_with(SessionsConfig::default);
    if sessions.cookie_name.is_none() {
        sessions.cookie_name = Some(DEFAULT_SESSION_COOKIE.to_string());
    }
    if sessions.ttl_minutes.is_none() {
        sessions.ttl_minutes = Some(DEFAULT_SESSION_TTL_MINUTES);
    }
    config
}

fn apply_logging_defaults(mut config: HireForgeConfig) -> HireForgeConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.json.is_none() {
        logging.json = Some(false);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protects_admin_by_default() {
        let cfg = apply_all_defaults(HireForgeConfig::default());
        let routes = cfg.access.unwrap().protected_routes;
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].prefix, "/admin");
        assert_eq!(routes[0].capability.as_deref(), Some("dashboard:view"));
    }

    #[test]
    fn fills_missing_route_capability_only() {
        let mut cfg = HireForgeConfig::default();
        cfg.access = Some(AccessConfig {
            protected_routes: vec![
                ProtectedRoute { prefix: "/admin".into(), capability: None },
                ProtectedRoute {
                    prefix: "/admin/settings".into(),
                    capability: Some("settings:manage".into()),
                },
            ],
            ..Default::default()
        });
        let routes = apply_all_defaults(cfg).access.unwrap().protected_routes;
        assert_eq!(routes[0].capability.as_deref(), Some("dashboard:view"));
        assert_eq!(routes[1].capability.as_deref(), Some("settings:manage"));
    }

    #[test]
    fn does_not_override_user_set_port() {
        let mut cfg = HireForgeConfig::default();
        cfg.gateway = Some(GatewayConfig { port: Some(3000), ..Default::default() });
        let cfg = apply_all_defaults(cfg);
        assert_eq!(cfg.gateway.unwrap().port, Some(3000));
    }

    #[test]
    fn applies_redirect_targets() {
        let access = apply_all_defaults(HireForgeConfig::default()).access.unwrap();
        assert_eq!(access.login_path.as_deref(), Some("/login"));
        assert_eq!(access.unauthorized_path.as_deref(), Some("/unauthorized"));
        assert_eq!(access.callback_param.as_deref(), Some("callbackUrl"));
    }
}
