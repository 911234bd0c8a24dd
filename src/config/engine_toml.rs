//! Parsing and validation for business-rules.toml configuration files

use crate::error::ConfigError;
use crate::script::ScriptLimits;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "business-rules.toml";

/// Main configuration struct for business-rules.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Engine metadata
    pub engine: EngineMeta,

    /// Script evaluation limits
    #[serde(default)]
    pub script: ScriptConfig,

    /// Template group catalog location
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineMeta {
                version: "1".to_string(),
            },
            script: ScriptConfig::default(),
            catalog: CatalogConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load configuration from `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.engine.version
            )));
        }

        if self.script.max_operations == 0 {
            return Err(ConfigError::Validation(
                "script.max_operations must be greater than zero".to_string(),
            ));
        }

        if self.script.max_call_levels == 0 {
            return Err(ConfigError::Validation(
                "script.max_call_levels must be greater than zero".to_string(),
            ));
        }

        if self.script.max_string_size == 0 {
            return Err(ConfigError::Validation(
                "script.max_string_size must be greater than zero".to_string(),
            ));
        }

        if self.catalog.extension.is_empty() || self.catalog.extension.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "Invalid catalog extension '{}'. Use the extension without a leading dot",
                self.catalog.extension
            )));
        }

        Ok(())
    }
}

/// Engine metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineMeta {
    /// Configuration version (must be "1")
    pub version: String,
}

/// Script section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptConfig {
    #[serde(default = "default_max_operations")]
    pub max_operations: u64,

    #[serde(default = "default_max_call_levels")]
    pub max_call_levels: usize,

    #[serde(default = "default_max_string_size")]
    pub max_string_size: usize,
}

fn default_max_operations() -> u64 {
    ScriptLimits::default().max_operations
}

fn default_max_call_levels() -> usize {
    ScriptLimits::default().max_call_levels
}

fn default_max_string_size() -> usize {
    ScriptLimits::default().max_string_size
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            max_operations: default_max_operations(),
            max_call_levels: default_max_call_levels(),
            max_string_size: default_max_string_size(),
        }
    }
}

impl ScriptConfig {
    pub fn limits(&self) -> ScriptLimits {
        ScriptLimits {
            max_operations: self.max_operations,
            max_call_levels: self.max_call_levels,
            max_string_size: self.max_string_size,
        }
    }
}

/// Catalog section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding template group documents
    #[serde(default = "default_catalog_directory")]
    pub directory: PathBuf,

    /// Extension of template group documents, without the dot
    #[serde(default = "default_catalog_extension")]
    pub extension: String,
}

fn default_catalog_directory() -> PathBuf {
    PathBuf::from("templates")
}

fn default_catalog_extension() -> String {
    "json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            directory: default_catalog_directory(),
            extension: default_catalog_extension(),
        }
    }
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CONFIG: &str = r#"
[engine]
version = "1"

[script]
max_operations = 5000
max_call_levels = 8

[catalog]
directory = "definitions/groups"
extension = "tg"

[output]
format = "jsonl"
color = "never"
"#;

    #[test]
    fn test_valid_config_parsing() {
        let config = Config::parse(VALID_CONFIG).unwrap();

        assert_eq!(config.engine.version, "1");
        assert_eq!(config.script.max_operations, 5000);
        assert_eq!(config.script.max_call_levels, 8);
        assert_eq!(
            config.script.max_string_size,
            ScriptLimits::default().max_string_size
        );
        assert_eq!(config.catalog.directory, PathBuf::from("definitions/groups"));
        assert_eq!(config.catalog.extension, "tg");
        assert_eq!(config.output.format, OutputFormat::Jsonl);
        assert_eq!(config.output.color, ColorOption::Never);
    }

    #[test]
    fn test_minimal_config() {
        let config = Config::parse("[engine]\nversion = \"1\"\n").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.script.limits(), ScriptLimits::default());
    }

    #[test]
    fn test_invalid_version() {
        let result = Config::parse("[engine]\nversion = \"2\"\n");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Unsupported configuration version")
        );
    }

    #[test]
    fn test_missing_engine_section() {
        let result = Config::parse("[script]\nmax_operations = 10\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_operations_rejected() {
        let result = Config::parse("[engine]\nversion = \"1\"\n[script]\nmax_operations = 0\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_zero_string_size_rejected() {
        let result = Config::parse("[engine]\nversion = \"1\"\n[script]\nmax_string_size = 0\n");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("script.max_string_size must be greater than zero")
        );
    }

    #[test]
    fn test_extension_with_dot_rejected() {
        let result = Config::parse("[engine]\nversion = \"1\"\n[catalog]\nextension = \".json\"\n");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid catalog extension")
        );
    }

    #[test]
    fn test_invalid_output_format() {
        let result = Config::parse("[engine]\nversion = \"1\"\n[output]\nformat = \"xml\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config::parse(VALID_CONFIG).unwrap();
        let serialized = toml::to_string(&config).unwrap();
        assert_eq!(Config::parse(&serialized).unwrap(), config);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let config = Config::load_or_default("/nonexistent/business-rules.toml").unwrap();
        assert_eq!(config, Config::default());
    }
}
