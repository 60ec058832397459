//! Database handle configuration.
//!
//! Defines the YAML-serializable configuration used to open a
//! [`Database`](crate::Database): which driver to use, where the database
//! lives, connection pragmas, and the mapping policy.
//!
//! # Example YAML
//!
//! ```yaml
//! driver: sqlite
//! path: data/clients.db
//! foreign_keys: true
//! busy_timeout_ms: 5000
//! mapping:
//!   unmapped_fields: skip
//!   unmatched_columns: warn
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use neat_core::{Driver, MappingPolicy};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Path that opens a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

fn default_foreign_keys() -> bool {
    true
}

/// Settings for opening a database handle.
///
/// # Examples
///
/// ```
/// use neat_sqlite::NeatConfig;
///
/// let config: NeatConfig = serde_yaml::from_str("path: clients.db").unwrap();
/// assert_eq!(config.path.to_str(), Some("clients.db"));
/// assert!(config.foreign_keys);
/// assert_eq!(config.busy_timeout_ms, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeatConfig {
    /// Statement dialect and client driver.
    #[serde(default)]
    pub driver: Driver,
    /// Database file, or `:memory:`.
    pub path: PathBuf,
    /// Handling of unannotated fields and unmatched result columns.
    #[serde(default)]
    pub mapping: MappingPolicy,
    /// Issue `PRAGMA foreign_keys = ON` after connecting.
    #[serde(default = "default_foreign_keys")]
    pub foreign_keys: bool,
    /// How long to wait on a locked database before failing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub busy_timeout_ms: Option<u64>,
}

impl NeatConfig {
    /// Configuration for `path` with default settings.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            driver: Driver::default(),
            path: path.into(),
            mapping: MappingPolicy::default(),
            foreign_keys: default_foreign_keys(),
            busy_timeout_ms: None,
        }
    }

    /// Configuration for a private in-memory database.
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY)
    }

    pub fn with_driver(mut self, driver: Driver) -> Self {
        self.driver = driver;
        self
    }

    pub fn with_mapping(mut self, mapping: MappingPolicy) -> Self {
        self.mapping = mapping;
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::SqliteError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::SqliteError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Returns `true` when the path names an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY
    }
}

#[cfg(test)]
mod tests {
    use neat_core::{ColumnPolicy, FieldPolicy};

    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
driver: postgres
path: data/clients.db
foreign_keys: false
busy_timeout_ms: 2500
mapping:
  unmapped_fields: reject
  unmatched_columns: ignore
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: NeatConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.driver, Driver::Postgres);
        assert_eq!(config.path, PathBuf::from("data/clients.db"));
        assert!(!config.foreign_keys);
        assert_eq!(config.busy_timeout_ms, Some(2500));
        assert_eq!(config.mapping.unmapped_fields, FieldPolicy::Reject);
        assert_eq!(config.mapping.unmatched_columns, ColumnPolicy::Ignore);
    }

    #[test]
    fn test_deserialize_minimal_uses_defaults() {
        let config: NeatConfig = serde_yaml::from_str("path: ':memory:'").unwrap();
        assert_eq!(config, NeatConfig::in_memory());
        assert!(config.is_in_memory());
        assert_eq!(config.mapping, MappingPolicy::default());
    }

    #[test]
    fn test_partial_mapping_section() {
        let yaml = "path: x.db\nmapping:\n  unmatched_columns: reject\n";
        let config: NeatConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.mapping.unmapped_fields, FieldPolicy::Skip);
        assert_eq!(config.mapping.unmatched_columns, ColumnPolicy::Reject);
    }

    #[test]
    fn test_unknown_driver_is_rejected() {
        assert!(serde_yaml::from_str::<NeatConfig>("driver: oracle\npath: x.db").is_err());
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("neat.yml");

        let original: NeatConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        original.save(&path).unwrap();

        let loaded = NeatConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = NeatConfig::load(dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, crate::SqliteError::IoError(_)));
    }
}
