// Configuration for file locations

use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::codec::DEFAULT_TASKS_FILE;

const APP_NAME: &str = "tasktrack";

/// Environment variable naming an alternate config file
pub const CONFIG_ENV: &str = "TASKTRACK_CONFIG";

/// Where tasks are stored and exports are written
///
/// Relative paths resolve against the current directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tasks_file: PathBuf,
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks_file: PathBuf::from(DEFAULT_TASKS_FILE),
            export_dir: PathBuf::from("."),
        }
    }
}

/// `<config dir>/tasktrack/config.yaml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.yaml"))
}

impl Config {
    /// Load using the explicit path, then `TASKTRACK_CONFIG`, then the default location
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load_from(explicit, from_env.as_deref(), default_config_path().as_deref())
    }

    /// Explicit and environment paths must exist; the default path is optional
    pub fn load_from(explicit: Option<&Path>, from_env: Option<&Path>, default: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit.or(from_env) {
            if !path.exists() {
                return Err(eyre!("Config file not found: {}", path.display()));
            }
            return Self::from_file(path);
        }

        match default {
            Some(path) if path.exists() => Self::from_file(path),
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(file = ?path, ?config, "Loaded config");
        Ok(config)
    }

    /// Command-line values win over file values
    pub fn with_overrides(mut self, tasks_file: Option<PathBuf>, export_dir: Option<PathBuf>) -> Self {
        if let Some(path) = tasks_file {
            self.tasks_file = path;
        }
        if let Some(dir) = export_dir {
            self.export_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tasks_file, PathBuf::from("tasks.txt"));
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_load_without_any_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("config.yaml");

        let config = Config::load_from(None, None, Some(missing.as_path())).unwrap();
        assert_eq!(config, Config::default());

        let config = Config::load_from(None, None, None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "tasks_file: /data/my_tasks.txt\n").unwrap();

        let config = Config::load_from(None, None, Some(path.as_path())).unwrap();
        assert_eq!(config.tasks_file, PathBuf::from("/data/my_tasks.txt"));
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_explicit_path_wins_over_env() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("explicit.yaml");
        let env = temp.path().join("env.yaml");
        fs::write(&explicit, "export_dir: exports\n").unwrap();
        fs::write(&env, "export_dir: elsewhere\n").unwrap();

        let config = Config::load_from(Some(explicit.as_path()), Some(env.as_path()), None).unwrap();
        assert_eq!(config.export_dir, PathBuf::from("exports"));

        let config = Config::load_from(None, Some(env.as_path()), None).unwrap();
        assert_eq!(config.export_dir, PathBuf::from("elsewhere"));
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");

        let result = Config::load_from(Some(missing.as_path()), None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_key_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "task_file: typo.txt\n").unwrap();

        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some(PathBuf::from("other.txt")), None);
        assert_eq!(config.tasks_file, PathBuf::from("other.txt"));
        assert_eq!(config.export_dir, PathBuf::from("."));
    }
}
