//! CLI Check Command
//!
//! Evaluates the gate offline for one path and an optional session role.

use anyhow::Result;
use hireforge_config::HireForgeConfig;
use hireforge_core::{Role, Session};
use hireforge_gateway::{AccessGate, AccessPolicy, Decision};
use hireforge_security::PermissionRegistry;

use crate::output::{note_error, note_success, note_warn};

/// Build the gate the server would run with this config.
pub fn gate_from_config(config: &HireForgeConfig) -> Result<AccessGate> {
    let registry = PermissionRegistry::with_overrides(&config.role_overrides()?);
    let policy = AccessPolicy::from_config(config)?;
    Ok(AccessGate::new(policy, registry))
}

/// One line describing the decision, e.g. `REDIRECT /unauthorized`.
pub fn describe(decision: &Decision) -> String {
    match decision {
        Decision::Allow => "ALLOW".to_string(),
        Decision::RedirectLogin { location } => format!("REDIRECT (login) {location}"),
        Decision::RedirectUnauthorized { location } => {
            format!("REDIRECT (unauthorized) {location}")
        }
    }
}

pub fn run(config: &HireForgeConfig, path: &str, role: Option<&str>) -> Result<()> {
    let gate = gate_from_config(config)?;
    let session = role.map(|r| Session::new("cli", Role::parse(r)));

    if let (Some(session), Some(raw)) = (&session, role) {
        if !session.role.is_known() {
            note_warn(&format!(
                "Role '{raw}' is not a known role; it holds no capabilities"
            ));
        }
    }

    match gate.policy().protected_rule(path) {
        Some(rule) => println!(
            "{path} is protected by {} (requires {})",
            rule.prefix, rule.capability
        ),
        None => println!("{path} is public"),
    }

    let decision = gate.decide(path, session.as_ref());
    let line = describe(&decision);
    match decision {
        Decision::Allow => note_success(&line),
        _ => note_error(&line),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_each_outcome() {
        let gate = gate_from_config(&HireForgeConfig::default()).unwrap();
        assert_eq!(describe(&gate.decide("/careers", None)), "ALLOW");
        assert_eq!(
            describe(&gate.decide("/admin/jobs", None)),
            "REDIRECT (login) /login?callbackUrl=%2Fadmin%2Fjobs"
        );
        let finance = Session::new("cli", Role::Finance);
        assert_eq!(
            describe(&gate.decide("/admin/jobs", Some(&finance))),
            "REDIRECT (unauthorized) /unauthorized"
        );
    }
}
