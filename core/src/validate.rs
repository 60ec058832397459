//! Record mapping validation.
//!
//! Extraction is lenient: unannotated fields are dropped and declarations
//! are passed through unchecked. This pass reports those situations up
//! front, before any statement is generated.
//!
//! # Examples
//!
//! ```
//! use neat_core::{ValidationError, record, validate_record};
//!
//! record! {
//!     pub struct Client {
//!         pub id: i64 => "id,INT PRIMARY KEY",
//!         pub name: String,
//!     }
//! }
//!
//! let errors = validate_record::<Client>();
//! assert_eq!(errors, vec![ValidationError::MissingAnnotation("name".into())]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::error::SchemaError;
use crate::extract::{extract, is_plain_identifier};
use crate::record::Record;

/// Words that cannot be used as a bare column name.
const RESERVED_WORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHECK", "COLUMN",
    "CONSTRAINT", "CREATE", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END",
    "EXISTS", "FOREIGN", "FROM", "GROUP", "HAVING", "IN", "INDEX", "INSERT", "INTO", "IS", "JOIN",
    "KEY", "LIMIT", "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER", "PRIMARY", "REFERENCES", "SELECT",
    "SET", "TABLE", "THEN", "TO", "UNION", "UNIQUE", "UPDATE", "USING", "VALUES", "WHEN", "WHERE",
];

/// Record mapping problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The type name is not a plain identifier.
    #[error("unsupported record type: {0}")]
    UnsupportedType(String),
    /// A field has no mapping annotation and will not be mapped.
    #[error("field {0} has no mapping annotation")]
    MissingAnnotation(String),
    /// Two fields map to the same column; result columns bind to the first.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
    /// A mapped field has no column declaration; CREATE TABLE leaves it untyped.
    #[error("field {0} has an empty column declaration")]
    EmptyDeclaration(String),
    /// A column name cannot be quoted as an identifier.
    #[error("invalid column name: {0:?}")]
    InvalidColumnName(String),
    /// A column name needs quoting; UPDATE statements write it bare and
    /// cannot target it.
    #[error("column name {0:?} is not a plain identifier and breaks UPDATE")]
    UnquotedColumnName(String),
}

/// Validates the mapping of record type `T`.
///
/// Returns every problem found; an empty vector means the record maps
/// cleanly. An unsupported type short-circuits the remaining checks.
pub fn validate_record<T: Record + ?Sized>() -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let columns = match extract::<T>() {
        Ok(columns) => columns,
        Err(SchemaError::UnsupportedType(name)) => {
            errors.push(ValidationError::UnsupportedType(name));
            return errors;
        }
        Err(other) => {
            errors.push(ValidationError::UnsupportedType(other.to_string()));
            return errors;
        }
    };

    errors.extend(
        columns
            .unmapped()
            .iter()
            .map(|field| ValidationError::MissingAnnotation(field.clone())),
    );

    let mut seen: HashSet<&str> = HashSet::new();
    for column in &columns {
        let name = column.db_name();
        if name.contains('\0') {
            errors.push(ValidationError::InvalidColumnName(name.to_string()));
        } else if !is_bare_column_name(name) {
            errors.push(ValidationError::UnquotedColumnName(name.to_string()));
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateColumn(name.to_string()));
        }
        if column.declaration().is_empty() {
            let field = column.field().to_string();
            errors.push(ValidationError::EmptyDeclaration(field));
        }
    }

    errors
}

fn is_bare_column_name(name: &str) -> bool {
    is_plain_identifier(name) && !RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(name))
}
