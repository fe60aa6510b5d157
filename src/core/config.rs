use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

pub const DEFAULT_SOURCE_NAME: &str = "El Toque";
pub const DEFAULT_SOURCE_URL: &str = "https://eltoque.com/tasas-de-cambio-de-moneda-en-cuba-hoy";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const SNAPSHOT_FILE_NAME: &str = "tasas_compra.json";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            name: DEFAULT_SOURCE_NAME.to_string(),
            url: DEFAULT_SOURCE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub interval_secs: u64,
    pub output_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            source: SourceConfig::default(),
            interval_secs: 3600,
            output_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file has been created there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("cu", "eltoque", "toque-rates")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Where the snapshot is written: the configured path, or a file next to
    /// the running executable.
    pub fn snapshot_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.output_path {
            return Ok(PathBuf::from(custom_path));
        }
        let exe = std::env::current_exe().context("Could not locate the running executable")?;
        let dir = exe
            .parent()
            .context("Executable path has no parent directory")?;
        Ok(dir.join(SNAPSHOT_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
source:
  name: "Mirror"
  url: "http://localhost:8080/tasas"
  timeout_secs: 3
interval_secs: 60
output_path: "/tmp/tasas.json"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.source.name, "Mirror");
        assert_eq!(config.source.url, "http://localhost:8080/tasas");
        assert_eq!(config.source.timeout(), Duration::from_secs(3));
        // Missing fields keep their defaults
        assert_eq!(config.source.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.interval(), Duration::from_secs(60));
        assert_eq!(
            config.snapshot_path().unwrap(),
            PathBuf::from("/tmp/tasas.json")
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
        assert_eq!(config.source.timeout_secs, 10);
        assert_eq!(config.interval_secs, 3600);
    }

    #[test]
    fn test_default_snapshot_path_is_next_to_executable() {
        let config = AppConfig::default();
        let path = config.snapshot_path().unwrap();
        assert_eq!(path.file_name().unwrap(), SNAPSHOT_FILE_NAME);
        let exe = std::env::current_exe().unwrap();
        assert_eq!(path.parent(), exe.parent());
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/definitely/not/here/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
