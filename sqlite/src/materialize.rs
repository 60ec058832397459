//! Result materialization: scanning query rows into new record instances.
//!
//! The column list is derived from the first instance the factory
//! produces; every later instance is assumed to share its record type.
//! Result columns are bound to fields by database name (first match
//! wins), and each row is scanned into a fresh instance.

use neat_core::{ColumnList, ColumnPolicy, MappingPolicy, Record, Value, extract_from};
use rusqlite::Connection;
use rusqlite::types::Value as SqlValue;
use tracing::{debug, warn};

use crate::convert::{bind_args, from_sql};
use crate::error::{Result, SqliteError};

/// Field targets for each result column, by result position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnBinding {
    targets: Vec<Option<String>>,
}

impl ColumnBinding {
    /// Binds each result column to the first column metadata sharing its name.
    pub(crate) fn new(columns: &ColumnList, result_columns: &[String]) -> Self {
        let targets = result_columns
            .iter()
            .map(|name| columns.by_db_name(name).map(|c| c.field().to_string()))
            .collect();
        Self { targets }
    }

    /// Result columns that matched no mapped field.
    pub(crate) fn unmatched<'a>(&self, result_columns: &'a [String]) -> Vec<&'a str> {
        self.targets
            .iter()
            .zip(result_columns)
            .filter(|(target, _)| target.is_none())
            .map(|(_, name)| name.as_str())
            .collect()
    }

    fn scan<T: Record>(&self, row: &rusqlite::Row<'_>, target: &mut T) -> Result<()> {
        for (index, field) in self.targets.iter().enumerate() {
            if let Some(field) = field {
                let raw: SqlValue = row.get(index)?;
                target.set_field_value(field, from_sql(raw))?;
            }
        }
        Ok(())
    }
}

/// Runs `query` and scans every result row into an instance from `factory`.
pub(crate) fn select_all<T, F>(
    conn: &Connection,
    policy: MappingPolicy,
    query: &str,
    mut factory: F,
    args: &[Value],
) -> Result<Vec<T>>
where
    T: Record,
    F: FnMut() -> T,
{
    let mut stmt = conn.prepare(query)?;
    let result_columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut target = factory();
    let columns = extract_from(&target)?;
    policy.check_fields(T::type_name(), &columns)?;

    let binding = ColumnBinding::new(&columns, &result_columns);
    let unmatched = binding.unmatched(&result_columns);
    if !unmatched.is_empty() {
        match policy.unmatched_columns {
            ColumnPolicy::Ignore => {}
            ColumnPolicy::Warn => warn!(
                record = T::type_name(),
                columns = ?unmatched,
                "result columns do not match any mapped field and are left unbound"
            ),
            ColumnPolicy::Reject => {
                return Err(SqliteError::UnmatchedColumns(
                    unmatched.into_iter().map(String::from).collect(),
                ));
            }
        }
    }

    debug!(query, args = args.len(), "selecting records");
    let mut rows = stmt.query(bind_args(args))?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        binding.scan(row, &mut target)?;
        records.push(target);
        target = factory();
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use neat_core::ColumnMetadata;

    use super::*;

    fn columns() -> ColumnList {
        [
            ColumnMetadata::new("id", "id", "INT"),
            ColumnMetadata::new("name", "name", "TEXT"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_binding_by_db_name() {
        let result = vec!["name".to_string(), "extra".to_string(), "id".to_string()];
        let binding = ColumnBinding::new(&columns(), &result);
        assert_eq!(
            binding.targets,
            vec![Some("name".to_string()), None, Some("id".to_string())]
        );
        assert_eq!(binding.unmatched(&result), vec!["extra"]);
    }

    #[test]
    fn test_binding_is_case_sensitive() {
        let result = vec!["ID".to_string()];
        let binding = ColumnBinding::new(&columns(), &result);
        assert_eq!(binding.unmatched(&result), vec!["ID"]);
    }
}
