//! Config file read/write.

use crate::schema::HireForgeConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the HireForge config directory.
/// Priority: `HIREFORGE_CONFIG_DIR` env > `~/.hireforge/` > `./.hireforge`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("HIREFORGE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".hireforge");
    }
    PathBuf::from(".hireforge")
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<HireForgeConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(HireForgeConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file parses as YAML null; treat it like a missing file.
    if raw.trim().is_empty() {
        return Ok(HireForgeConfig::default());
    }

    let config: HireForgeConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Write config to disk atomically (write to temp file, rename).
pub async fn write_config(config: &HireForgeConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    let tmp_path = path.with_extension("yaml.tmp");
    fs::write(&tmp_path, yaml.as_bytes())
        .await
        .with_context(|| format!("Failed to write temp config: {}", tmp_path.display()))?;

    fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("Failed to rename temp config to: {}", path.display()))?;

    info!(path = %path.display(), "Wrote config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::GatewayConfig;

    #[tokio::test]
    async fn missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("nope.yaml")).await.unwrap();
        assert!(cfg.gateway.is_none());
    }

    #[tokio::test]
    async fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(&dir.path().join("nested"));
        let cfg = HireForgeConfig {
            gateway: Some(GatewayConfig { port: Some(4100), ..Default::default() }),
            ..Default::default()
        };
        write_config(&cfg, &path).await.unwrap();
        let loaded = load_config(&path).await.unwrap();
        assert_eq!(loaded.gateway.unwrap().port, Some(4100));
        assert!(!path.with_extension("yaml.tmp").exists());
    }

    #[tokio::test]
    async fn malformed_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "gateway: [not, a, map").unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config YAML"));
    }
}
