//! Engine configuration
//!
//! Loaded from a JSON file. Every field has a default, so `{}` is a valid
//! configuration that reads `tables/<name>.csv`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid config JSON
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds an unusable value
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Directory holding one file per table
    #[serde(default = "default_tables_dir")]
    pub tables_dir: PathBuf,

    /// Table file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Field delimiter of table files
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Log every join-order decision at TRACE
    #[serde(default)]
    pub trace_planning: bool,
}

fn default_tables_dir() -> PathBuf {
    PathBuf::from("tables")
}
fn default_extension() -> String {
    "csv".to_string()
}
fn default_delimiter() -> char {
    ','
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tables_dir: default_tables_dir(),
            extension: default_extension(),
            delimiter: default_delimiter(),
            trace_planning: false,
        }
    }
}

impl EngineConfig {
    /// Config reading tables from `dir` with all other fields defaulted.
    pub fn with_tables_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            tables_dir: dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates field values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.extension.is_empty() {
            return Err(ConfigError::Invalid("extension must not be empty".into()));
        }
        if self.extension.contains('.') {
            return Err(ConfigError::Invalid(format!(
                "extension '{}' must not contain '.'",
                self.extension
            )));
        }
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ConfigError::Invalid(format!(
                "delimiter {:?} is not a usable single-byte separator",
                self.delimiter
            )));
        }
        Ok(())
    }

    /// Path of the file backing `table`
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.tables_dir.join(format!("{}.{}", table, self.extension))
    }

    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII; fall back to ',' for unvalidated configs
        u8::try_from(self.delimiter).unwrap_or(b',')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.tables_dir, PathBuf::from("tables"));
        assert_eq!(config.table_path("users"), PathBuf::from("tables/users.csv"));
        assert_eq!(config.delimiter_byte(), b',');
        assert!(!config.trace_planning);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config =
            EngineConfig::from_json(r#"{"tables_dir": "/data", "delimiter": "|"}"#).unwrap();
        assert_eq!(config.table_path("a"), PathBuf::from("/data/a.csv"));
        assert_eq!(config.delimiter_byte(), b'|');
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = EngineConfig::from_json(r#"{"table_dir": "x"}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            EngineConfig::from_json(r#"{"extension": ""}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"extension": "tar.gz"}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"delimiter": "é"}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quarry.json");
        fs::write(&path, r#"{"extension": "tsv", "delimiter": "\t", "trace_planning": true}"#)
            .unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.extension, "tsv");
        assert_eq!(config.delimiter_byte(), b'\t');
        assert!(config.trace_planning);
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let result = EngineConfig::load(&tmp.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
