//! CLI Validate Command
//!
//! Loads the config file, applies env overrides and defaults, and prints the
//! validation report.

use std::path::Path;

use anyhow::{bail, Result};
use hireforge_config::{apply_all_defaults, apply_env_overrides, load_config, validate};

use crate::output::{note_error, note_success, note_warn};

pub async fn run(path: &Path) -> Result<()> {
    println!("Validating {}", path.display());
    if !path.exists() {
        note_warn("Config file not found; checking built-in defaults");
    }

    let config = load_config(path).await?;
    let config = apply_all_defaults(apply_env_overrides(config)?);
    let report = validate(&config);

    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }

    if !report.is_valid() {
        bail!("{} error(s) found", report.errors.len());
    }
    note_success("Config is valid");
    Ok(())
}
