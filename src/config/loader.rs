//! Configuration loading and discovery for `janus.toml`
//!
//! Provides functions to find, load, and merge configuration.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::schema::JanusConfig;

/// Name of the configuration file looked up by [`find_config`].
pub const CONFIG_FILE_NAME: &str = "janus.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse janus.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Force `ltr`/`rtl` swapping inside URLs
    pub dir_in_url: Option<bool>,
    /// Force `left`/`right` swapping inside URLs
    pub edge_in_url: Option<bool>,
    /// Override the batch output suffix
    pub suffix: Option<String>,
    /// Override the number of batch workers
    pub jobs: Option<usize>,
}

/// Find janus.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for janus.toml
/// 2. Check XDG_CONFIG_HOME/cssjanus/janus.toml (or ~/.config/cssjanus/janus.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find janus.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("cssjanus").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find janus.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a janus.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config`] to locate one. If no config file is found, returns the
/// default configuration.
pub fn load_config(path: Option<&Path>) -> Result<JanusConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(JanusConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<JanusConfig, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let contents = fs::read_to_string(path)?;
    let config: JanusConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut JanusConfig, overrides: &CliOverrides) {
    if let Some(dir_in_url) = overrides.dir_in_url {
        config.transform.transform_dir_in_url = dir_in_url;
    }
    if let Some(edge_in_url) = overrides.edge_in_url {
        config.transform.transform_edge_in_url = edge_in_url;
    }
    if let Some(ref suffix) = overrides.suffix {
        config.batch.suffix = suffix.clone();
    }
    if let Some(jobs) = overrides.jobs {
        config.batch.jobs = jobs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[transform]\n");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[transform]\n");

        let subdir = temp.path().join("styles").join("themes");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_config_from(temp.path().to_path_buf()), None);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br#"
[transform]
transform_dir_in_url = true

[batch]
suffix = "-rtl"
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert!(config.transform.transform_dir_in_url);
        assert!(!config.transform.transform_edge_in_url);
        assert_eq!(config.batch.suffix, "-rtl");
        assert_eq!(config.batch.jobs, 0);
    }

    #[test]
    fn test_load_config_missing_file_is_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"this is not valid toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[batch]\nsuffix = \"\"\n");

        match load_config(Some(&config_path)) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("batch.suffix"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = JanusConfig::default();
        let overrides = CliOverrides {
            edge_in_url: Some(true),
            jobs: Some(2),
            ..Default::default()
        };
        merge_cli_overrides(&mut config, &overrides);

        assert!(!config.transform.transform_dir_in_url);
        assert!(config.transform.transform_edge_in_url);
        assert_eq!(config.batch.suffix, ".rtl");
        assert_eq!(config.batch.jobs, 2);
    }
}
