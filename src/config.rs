use serde::{Deserialize, Serialize};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::fs;

const APP_DIR: &str = "project-wizard";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectDefaults,
    /// YAML catalog of systems and plugins; built-in when unset
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// YAML key -> string table overriding the English texts
    #[serde(default)]
    pub locale: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Exit instead of restarting when the wizard is cancelled
    #[serde(default)]
    pub close_on_cancel: bool,
    /// Write into a folder that already holds a project file
    #[serde(default)]
    pub overwrite: bool,
}

/// Values pre-filled on the location step
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProjectDefaults {
    pub default_folder: String,
    pub default_name: String,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            default_folder: dirs::home_dir()
                .map(|p| p.join("projects").to_string_lossy().to_string())
                .unwrap_or_default(),
            default_name: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl LoggingConfig {
    pub fn log_dir(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("logs")
        })
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    let config: Config = serde_yaml_ng::from_str(&contents)?;
    Ok(config)
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    // 0. Path given on the command line
    if let Some(path) = explicit {
        return read_config(path);
    }

    // 1. Check local config.yaml
    let local_config = Path::new("config.yaml");
    if local_config.exists() {
        return read_config(local_config);
    }

    // 2. Check ~/.config/project-wizard/config.yaml
    if let Some(config_path) = get_config_path() {
        if config_path.exists() {
            return read_config(&config_path);
        }
    }

    Ok(Config::default())
}

/// Location of the per-user config file
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml_ng::from_str("close_on_cancel: true\n").unwrap();
        assert!(config.close_on_cancel);
        assert_eq!(config.logging.level, "info");
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_load_explicit_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("wizard.yaml");
        fs::write(
            &path,
            "project:\n  default_folder: /srv\n  default_name: game\nlogging:\n  level: debug\n  directory: null\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.project.default_folder, "/srv");
        assert_eq!(config.project.default_name, "game");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        assert!(load_config(Some(Path::new("/nonexistent/wizard.yaml"))).is_err());
    }
}
