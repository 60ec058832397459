//! Error types for record schema extraction and statement generation.
//!
//! Every fault raised while deriving column metadata from a [`Record`]
//! type, converting field values, or building statement text surfaces as
//! a [`SchemaError`]. None of these are panics: callers get a value they
//! can inspect and recover from.
//!
//! [`Record`]: crate::Record

use thiserror::Error;

/// Errors that can occur while mapping records to SQL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The type handed to the extractor does not describe a usable record.
    #[error("unsupported type: {0:?} is not a record type")]
    UnsupportedType(String),

    /// A field identifier was not declared on the record.
    #[error("record {record} has no field named {field}")]
    UnknownField { record: String, field: String },

    /// Fields lacked a mapping annotation and the policy rejects them.
    #[error("record {record} has unmapped fields: {}", .fields.join(", "))]
    UnmappedFields { record: String, fields: Vec<String> },

    /// A value could not be converted into (or out of) a field's type.
    #[error("cannot convert field {field}: expected {expected}, found {found}")]
    Conversion {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A statement was requested for a table with no mapped columns.
    #[error("cannot build a statement for table {0}: no mapped columns")]
    EmptyColumnList(String),

    /// A table or column name cannot be quoted safely.
    #[error("invalid identifier {0:?}")]
    InvalidIdentifier(String),
}

/// Convenience alias for results with [`SchemaError`].
pub type Result<T> = std::result::Result<T, SchemaError>;
