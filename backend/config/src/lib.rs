//! `hireforge-config`: HireForge runtime configuration management.
//!
//! Provides:
//! - Typed config schema (gateway, access policy, role overrides, sessions, logging)
//! - YAML read/write
//! - `HIREFORGE_*` environment overrides
//! - Default value application
//! - Validation with path-addressed errors and warnings

pub mod defaults;
pub mod env;
pub mod io;
pub mod resolve;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, apply_env_overrides_with, InvalidEnvOverride};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use resolve::{prefix_covers, RouteRule};
pub use schema::HireForgeConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Load, apply env overrides and defaults, and validate a config file.
///
/// This is the main entry point for loading a config at runtime. Warnings
/// are logged; any validation error aborts.
pub async fn load_and_prepare(path: &Path) -> Result<HireForgeConfig> {
    let config = load_config(path).await?;
    let config = apply_env_overrides(config).context("Failed to apply env overrides")?;
    prepare(config)
}

/// Defaults + validation on an already-loaded config.
pub fn prepare(config: HireForgeConfig) -> Result<HireForgeConfig> {
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        bail!("Config has {} validation error(s)", report.errors.len());
    }

    Ok(config)
}
