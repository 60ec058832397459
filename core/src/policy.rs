//! Policies for lenient mapping situations.
//!
//! Two situations are tolerated by default: record fields without a
//! mapping annotation (left out of every statement) and result columns
//! that match no mapped field (left unbound). A [`MappingPolicy`] decides
//! whether each is skipped quietly, logged, or rejected.

use serde::{Deserialize, Serialize};

use crate::column::ColumnList;
use crate::error::{Result, SchemaError};

/// Handling of record fields that carry no mapping annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolicy {
    /// Leave the field out of the column list.
    #[default]
    Skip,
    /// Fail the operation.
    Reject,
}

/// Handling of result columns with no matching mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPolicy {
    /// Leave the column unbound.
    Ignore,
    /// Leave the column unbound and log a warning.
    #[default]
    Warn,
    /// Fail the query.
    Reject,
}

/// Combined mapping policy.
///
/// # Examples
///
/// ```
/// use neat_core::{ColumnPolicy, FieldPolicy, MappingPolicy};
///
/// let policy = MappingPolicy::default();
/// assert_eq!(policy.unmapped_fields, FieldPolicy::Skip);
/// assert_eq!(policy.unmatched_columns, ColumnPolicy::Warn);
///
/// let strict = MappingPolicy::strict();
/// assert_eq!(strict.unmatched_columns, ColumnPolicy::Reject);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingPolicy {
    pub unmapped_fields: FieldPolicy,
    pub unmatched_columns: ColumnPolicy,
}

impl MappingPolicy {
    /// Rejects both unmapped fields and unmatched result columns.
    pub fn strict() -> Self {
        Self {
            unmapped_fields: FieldPolicy::Reject,
            unmatched_columns: ColumnPolicy::Reject,
        }
    }

    /// Applies the unmapped-field policy to the columns extracted for `record`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnmappedFields`] when fields were skipped and
    /// the policy is [`FieldPolicy::Reject`].
    pub fn check_fields(&self, record: &str, columns: &ColumnList) -> Result<()> {
        if self.unmapped_fields == FieldPolicy::Reject && !columns.unmapped().is_empty() {
            return Err(SchemaError::UnmappedFields {
                record: record.to_string(),
                fields: columns.unmapped().to_vec(),
            });
        }
        Ok(())
    }
}
