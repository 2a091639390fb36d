// CLI configuration file

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Optional settings read from `config.yaml` in the user config directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the task database. Defaults to the platform data dir.
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// file is absent.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&text).context("Failed to parse config file")?;

        debug!(?config, "Loaded config");
        Ok(config)
    }

    /// Directory for the task database: the configured path if set,
    /// otherwise `<data dir>/tasklist`.
    pub fn store_dir(&self) -> PathBuf {
        if let Some(path) = &self.store_path {
            return path.clone();
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tasklist")
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tasklist").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_reads_store_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "store_path: /tmp/somewhere\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.store_path, Some(PathBuf::from("/tmp/somewhere")));
        assert_eq!(config.store_dir(), PathBuf::from("/tmp/somewhere"));
    }

    #[test]
    fn test_load_from_rejects_bad_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "store_path: [not, a, path\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_default_store_dir_used_when_unset() {
        let config = Config::default();
        assert!(config.store_dir().ends_with("tasklist"));
    }
}
