//! CLI Roles Command
//!
//! Prints the effective role → capability table.

use anyhow::Result;
use hireforge_config::HireForgeConfig;
use hireforge_core::Capability;
use hireforge_security::PermissionRegistry;

use crate::output::render_table;

pub fn run(config: &HireForgeConfig, capability: Option<&str>, json: bool) -> Result<()> {
    let registry = PermissionRegistry::with_overrides(&config.role_overrides()?);

    if let Some(raw) = capability {
        let capability = Capability::parse(raw)?;
        let roles: Vec<String> = registry
            .roles_with(capability.as_str())
            .iter()
            .map(|r| r.to_string())
            .collect();
        if json {
            println!("{}", serde_json::to_string_pretty(&roles)?);
        } else if roles.is_empty() {
            println!("No role holds {capability}");
        } else {
            println!("{capability}: {}", roles.join(", "));
        }
        return Ok(());
    }

    let snapshot = registry.snapshot();
    if json {
        let map: serde_json::Map<String, serde_json::Value> = snapshot
            .iter()
            .map(|(role, caps)| (role.to_string(), serde_json::json!(caps)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    print!("{}", render_table(&["ROLE", "CAPABILITIES"], &table_rows(&registry)));
    Ok(())
}

fn table_rows(registry: &PermissionRegistry) -> Vec<Vec<String>> {
    registry
        .snapshot()
        .into_iter()
        .map(|(role, caps)| {
            let caps = if caps.is_empty() {
                "-".to_string()
            } else {
                caps.iter().map(Capability::as_str).collect::<Vec<_>>().join(" ")
            };
            vec![role.to_string(), caps]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_cover_every_role_and_mark_empty_sets() {
        let rows = table_rows(&PermissionRegistry::builtin());
        assert_eq!(rows.len(), 9);
        let finance = rows.iter().find(|r| r[0] == "FINANCE").unwrap();
        assert_eq!(finance[1], "-");
        let viewer = rows.iter().find(|r| r[0] == "VIEWER").unwrap();
        assert!(viewer[1].contains("dashboard:view"));
    }
}
