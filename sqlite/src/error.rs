//! Error types for database handle operations.
//!
//! Provides a unified error type covering client failures, mapping faults
//! raised while building statements or scanning rows, configuration
//! loading, and missing records.

use neat_core::{SchemaError, Value, format_args_list};
use thiserror::Error;

/// Errors that can occur during database handle operations.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// SQLite client failure, propagated as returned by the client.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// Metadata extraction, statement generation, or value conversion failure.
    #[error("schema error: {0}")]
    SchemaError(#[from] SchemaError),

    /// `select_one` found no rows.
    #[error("record not found for query {query} and args {}", format_args_list(.args))]
    RecordNotFound { query: String, args: Vec<Value> },

    /// Result columns matched no mapped field and the policy rejects them.
    #[error("result columns not mapped to any field: {}", .0.join(", "))]
    UnmatchedColumns(Vec<String>),

    /// The configured driver is not executed by this client.
    #[error("unsupported driver '{0}': this handle executes through sqlite")]
    UnsupportedDriver(String),

    /// Configuration file I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`SqliteError`].
pub type Result<T> = std::result::Result<T, SqliteError>;
