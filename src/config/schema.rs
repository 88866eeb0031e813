//! Configuration schema types for `janus.toml`

use serde::{Deserialize, Serialize};

use crate::transform::TransformOptions;

/// Settings for `cssjanus batch`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Appended to the file stem of every output (`app.css` -> `app.rtl.css`)
    pub suffix: String,
    /// Number of worker threads; 0 lets rayon decide
    pub jobs: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { suffix: ".rtl".to_string(), jobs: 0 }
    }
}

/// Root of `janus.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JanusConfig {
    /// Flip options applied to every stylesheet
    pub transform: TransformOptions,
    pub batch: BatchConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "batch.suffix")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "janus.toml: '{}' {}", self.field, self.message)
    }
}

impl JanusConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        // An empty suffix would overwrite the inputs
        if self.batch.suffix.is_empty() {
            errors.push(ConfigValidationError {
                field: "batch.suffix".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        if self.batch.suffix.contains(['/', '\\']) {
            errors.push(ConfigValidationError {
                field: "batch.suffix".to_string(),
                message: "must not contain path separators".to_string(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config: JanusConfig = toml::from_str("").unwrap();
        assert_eq!(config, JanusConfig::default());
        assert_eq!(config.batch.suffix, ".rtl");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let config: JanusConfig = toml::from_str(
            r#"
[transform]
transform_dir_in_url = true
transform_edge_in_url = true

[batch]
suffix = "-rtl"
jobs = 4
"#,
        )
        .unwrap();
        assert!(config.transform.transform_dir_in_url);
        assert!(config.transform.transform_edge_in_url);
        assert_eq!(config.batch.suffix, "-rtl");
        assert_eq!(config.batch.jobs, 4);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(toml::from_str::<JanusConfig>("[output]\nminify = true").is_err());
    }

    #[test]
    fn test_validate_suffix() {
        let mut config = JanusConfig::default();
        config.batch.suffix = String::new();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "batch.suffix");

        config.batch.suffix = "/rtl".to_string();
        assert_eq!(
            config.validate()[0].to_string(),
            "janus.toml: 'batch.suffix' must not contain path separators"
        );
    }
}
