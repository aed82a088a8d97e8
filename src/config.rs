//! Conversion configuration and its TOML file format
//!
//! ```toml
//! [rewrite]
//! strict = true
//! max_depth = 64
//! text_keys = ["Text", "Hint"]
//!
//! [template]
//! excluded_types = ["DynamicComponents"]
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::rewrite::RewriteConfig;
use crate::template::TemplateConfig;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration for the complete conversion pipeline
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    /// Rewriter configuration
    pub rewrite: RewriteConfig,
    /// Template assembly configuration
    pub template: TemplateConfig,
}

/// TOML structure for deserializing configuration files
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    rewrite: Option<TomlRewrite>,
    template: Option<TomlTemplate>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlRewrite {
    strict: Option<bool>,
    max_depth: Option<usize>,
    text_keys: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTemplate {
    excluded_types: Option<Vec<String>>,
}

impl ConvertConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(rewrite) = parsed.rewrite {
            if let Some(strict) = rewrite.strict {
                config.rewrite.strict = strict;
            }
            if let Some(max_depth) = rewrite.max_depth {
                config.rewrite.max_depth = max_depth;
            }
            if let Some(text_keys) = rewrite.text_keys {
                config.rewrite.text_keys = text_keys;
            }
        }
        if let Some(template) = parsed.template {
            if let Some(excluded_types) = template.excluded_types {
                config.template.excluded_types = excluded_types;
            }
        }

        Ok(config)
    }

    /// Set the rewriter configuration
    pub fn with_rewrite(mut self, config: RewriteConfig) -> Self {
        self.rewrite = config;
        self
    }

    /// Set the template assembly configuration
    pub fn with_template(mut self, config: TemplateConfig) -> Self {
        self.template = config;
        self
    }

    /// Enable or disable strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.rewrite.strict = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ConvertConfig::default();
        assert!(!config.rewrite.strict);
        assert_eq!(config.rewrite.max_depth, crate::rewrite::DEFAULT_MAX_DEPTH);
        assert_eq!(config.rewrite.text_keys, vec!["Text"]);
        assert_eq!(config.template.excluded_types, vec!["DynamicComponents"]);
    }

    #[test]
    fn test_parse_full_toml() {
        let config = ConvertConfig::from_toml(
            r#"
[rewrite]
strict = true
max_depth = 10
text_keys = ["Text", "Hint"]

[template]
excluded_types = ["DynamicComponents", "Notifier"]
"#,
        )
        .expect("Should parse");
        assert!(config.rewrite.strict);
        assert_eq!(config.rewrite.max_depth, 10);
        assert_eq!(config.rewrite.text_keys, vec!["Text", "Hint"]);
        assert_eq!(config.template.excluded_types.len(), 2);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConvertConfig::from_toml("[rewrite]\nstrict = true\n").expect("Should parse");
        assert!(config.rewrite.strict);
        assert_eq!(config.rewrite.text_keys, vec!["Text"]);
        assert_eq!(config.template.excluded_types, vec!["DynamicComponents"]);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ConvertConfig::from_toml("").expect("Should parse");
        assert!(!config.rewrite.strict);
    }

    #[test]
    fn test_unknown_key_error() {
        assert!(ConvertConfig::from_toml("[rewrite]\nstrikt = true\n").is_err());
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(ConvertConfig::from_toml("this is not valid toml {{{{").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[template]\nexcluded_types = []").unwrap();
        let config = ConvertConfig::from_file(file.path()).expect("Should load");
        assert!(config.template.excluded_types.is_empty());
    }

    #[test]
    fn test_missing_file_error() {
        let result = ConvertConfig::from_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
