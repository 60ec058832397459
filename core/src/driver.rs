//! Dialect-aware statement text generation.
//!
//! Each supported database is a variant of [`Driver`]. Variants differ only
//! in their [`Dialect`] (placeholder style and identifier quoting); the
//! CREATE/INSERT/UPDATE templates are shared, so adding a database means
//! adding a variant with its dialect.
//!
//! Generated text follows fixed templates:
//!
//! ```text
//! CREATE TABLE "T" (
//! "a" <decl a>,
//! "b" <decl b>
//! );
//!
//! INSERT INTO "T" ("a","b") VALUES (?,?);
//!
//! UPDATE "T" SET a = ?, b = ? WHERE <key column> = ?
//! ```
//!
//! The UPDATE keeps the key column in its SET list. That rewrites the key
//! with its own value and is a known inefficiency.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::column::ColumnList;
use crate::error::{Result, SchemaError};

/// How statement parameters are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?` for every parameter.
    QuestionMark,
    /// `$1`, `$2`, ... numbered from one.
    DollarNumbered,
}

/// SQL syntax quirks of one database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    name: &'static str,
    placeholder: PlaceholderStyle,
    quote: char,
}

impl Dialect {
    pub const SQLITE: Dialect = Dialect {
        name: "sqlite",
        placeholder: PlaceholderStyle::QuestionMark,
        quote: '"',
    };

    pub const POSTGRES: Dialect = Dialect {
        name: "postgres",
        placeholder: PlaceholderStyle::DollarNumbered,
        quote: '"',
    };

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn placeholder_style(&self) -> PlaceholderStyle {
        self.placeholder
    }

    /// Placeholder for the 1-based parameter `position`.
    pub fn placeholder(&self, position: usize) -> String {
        match self.placeholder {
            PlaceholderStyle::QuestionMark => "?".to_string(),
            PlaceholderStyle::DollarNumbered => format!("${position}"),
        }
    }

    /// Quotes an identifier, doubling any embedded quote character.
    pub fn quote_ident(&self, name: &str) -> String {
        let q = self.quote;
        let escaped = name.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }
}

/// Capability interface of a database driver.
///
/// Statement methods may refuse to build text for malformed metadata; the
/// refusal is returned to the caller unchanged.
pub trait StatementDriver {
    /// SQL dialect of the target database.
    fn dialect(&self) -> Dialect;

    /// Name the database client uses to select its connection driver.
    fn driver_name(&self) -> &'static str;

    /// `CREATE TABLE` statement with one definition per column.
    fn create_table_statement(&self, table: &str, columns: &ColumnList) -> Result<String>;

    /// `INSERT` statement with one placeholder per column, in column order.
    fn insert_statement(&self, table: &str, columns: &ColumnList) -> Result<String>;

    /// `UPDATE` statement setting every column, filtered on `key_field`.
    ///
    /// `key_field` is a field identifier. When no column maps it, the
    /// identifier itself is used as the column name.
    fn update_statement(
        &self,
        table: &str,
        columns: &ColumnList,
        key_field: &str,
    ) -> Result<String>;
}

/// Supported databases.
///
/// # Examples
///
/// ```
/// use neat_core::{ColumnMetadata, ColumnList, Driver, StatementDriver};
///
/// let columns: ColumnList = [
///     ColumnMetadata::new("id", "id", "INT PRIMARY KEY"),
///     ColumnMetadata::new("name", "name", "TEXT"),
/// ]
/// .into_iter()
/// .collect();
///
/// let sql = Driver::Sqlite.insert_statement("CLIENT", &columns).unwrap();
/// assert_eq!(sql, r#"INSERT INTO "CLIENT" ("id","name") VALUES (?,?);"#);
///
/// let sql = Driver::Postgres.update_statement("CLIENT", &columns, "id").unwrap();
/// assert_eq!(sql, r#"UPDATE "CLIENT" SET id = $1, name = $2 WHERE id = $3"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    #[default]
    Sqlite,
    Postgres,
}

impl StatementDriver for Driver {
    fn dialect(&self) -> Dialect {
        match self {
            Driver::Sqlite => Dialect::SQLITE,
            Driver::Postgres => Dialect::POSTGRES,
        }
    }

    fn driver_name(&self) -> &'static str {
        self.dialect().name()
    }

    fn create_table_statement(&self, table: &str, columns: &ColumnList) -> Result<String> {
        let dialect = self.dialect();
        check_statement(table, columns)?;

        let definitions: Vec<String> = columns
            .iter()
            .map(|c| format!("{} {}", dialect.quote_ident(c.db_name()), c.declaration()))
            .collect();

        Ok(format!(
            "CREATE TABLE {} (\n{}\n);\n",
            dialect.quote_ident(table),
            definitions.join(",\n")
        ))
    }

    fn insert_statement(&self, table: &str, columns: &ColumnList) -> Result<String> {
        let dialect = self.dialect();
        check_statement(table, columns)?;

        let names: Vec<String> = columns
            .iter()
            .map(|c| dialect.quote_ident(c.db_name()))
            .collect();
        let placeholders: Vec<String> = (1..=columns.len())
            .map(|i| dialect.placeholder(i))
            .collect();

        Ok(format!(
            "INSERT INTO {} ({}) VALUES ({});",
            dialect.quote_ident(table),
            names.join(","),
            placeholders.join(",")
        ))
    }

    fn update_statement(
        &self,
        table: &str,
        columns: &ColumnList,
        key_field: &str,
    ) -> Result<String> {
        let dialect = self.dialect();
        check_statement(table, columns)?;

        let assignments: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = {}", c.db_name(), dialect.placeholder(i + 1)))
            .collect();

        let key_column = columns.db_name_for(key_field).unwrap_or_else(|| {
            warn!(
                table,
                key_field,
                "key field is not a mapped column; using it as the column name"
            );
            key_field
        });

        Ok(format!(
            "UPDATE {} SET {} WHERE {} = {}",
            dialect.quote_ident(table),
            assignments.join(", "),
            key_column,
            dialect.placeholder(columns.len() + 1)
        ))
    }
}

fn check_statement(table: &str, columns: &ColumnList) -> Result<()> {
    check_identifier(table)?;
    if columns.is_empty() {
        return Err(SchemaError::EmptyColumnList(table.to_string()));
    }
    for column in columns {
        check_identifier(column.db_name())?;
    }
    Ok(())
}

fn check_identifier(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('\0') {
        return Err(SchemaError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnMetadata;

    fn client_columns() -> ColumnList {
        [
            ColumnMetadata::new("id", "id", "INT PRIMARY KEY"),
            ColumnMetadata::new("name", "name", "VARCHAR(100) NOT NULL"),
            ColumnMetadata::new("address", "address", "TEXT NOT NULL"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_create_table_statement() {
        let sql = Driver::Sqlite
            .create_table_statement("CLIENT", &client_columns())
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE \"CLIENT\" (\n\
             \"id\" INT PRIMARY KEY,\n\
             \"name\" VARCHAR(100) NOT NULL,\n\
             \"address\" TEXT NOT NULL\n\
             );\n"
        );
    }

    #[test]
    fn test_create_table_passes_empty_declaration_through() {
        let columns: ColumnList = [ColumnMetadata::new("note", "note", "")]
            .into_iter()
            .collect();
        let sql = Driver::Sqlite
            .create_table_statement("MEMO", &columns)
            .unwrap();
        assert_eq!(sql, "CREATE TABLE \"MEMO\" (\n\"note\" \n);\n");
    }

    #[test]
    fn test_insert_statement() {
        let sql = Driver::Sqlite
            .insert_statement("CLIENT", &client_columns())
            .unwrap();
        assert_eq!(
            sql,
            r#"INSERT INTO "CLIENT" ("id","name","address") VALUES (?,?,?);"#
        );
    }

    #[test]
    fn test_insert_statement_postgres_numbers_placeholders() {
        let sql = Driver::Postgres
            .insert_statement("CLIENT", &client_columns())
            .unwrap();
        assert_eq!(
            sql,
            r#"INSERT INTO "CLIENT" ("id","name","address") VALUES ($1,$2,$3);"#
        );
    }

    #[test]
    fn test_update_statement_keeps_key_in_set() {
        let sql = Driver::Sqlite
            .update_statement("CLIENT", &client_columns(), "id")
            .unwrap();
        assert_eq!(
            sql,
            r#"UPDATE "CLIENT" SET id = ?, name = ?, address = ? WHERE id = ?"#
        );
    }

    #[test]
    fn test_update_statement_uses_db_name_of_key() {
        let columns: ColumnList = [
            ColumnMetadata::new("Id", "client_id", "INT"),
            ColumnMetadata::new("Name", "name", "TEXT"),
        ]
        .into_iter()
        .collect();
        let sql = Driver::Sqlite
            .update_statement("CLIENT", &columns, "Id")
            .unwrap();
        assert!(sql.ends_with("WHERE client_id = ?"));
    }

    #[test]
    fn test_update_statement_unknown_key_falls_back() {
        let sql = Driver::Postgres
            .update_statement("CLIENT", &client_columns(), "rowid")
            .unwrap();
        assert!(sql.ends_with("WHERE rowid = $4"));
    }

    #[test]
    fn test_empty_column_list_is_refused() {
        let err = Driver::Sqlite
            .insert_statement("EMPTY", &ColumnList::new())
            .unwrap_err();
        assert_eq!(err, SchemaError::EmptyColumnList("EMPTY".into()));
    }

    #[test]
    fn test_invalid_identifier_is_refused() {
        let columns: ColumnList = [ColumnMetadata::new("x", "bad\0name", "INT")]
            .into_iter()
            .collect();
        assert!(matches!(
            Driver::Sqlite.create_table_statement("T", &columns),
            Err(SchemaError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            Driver::Sqlite.insert_statement("", &client_columns()),
            Err(SchemaError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(Dialect::SQLITE.quote_ident(r#"we"ird"#), r#""we""ird""#);
    }

    #[test]
    fn test_driver_names() {
        assert_eq!(Driver::Sqlite.driver_name(), "sqlite");
        assert_eq!(Driver::Postgres.driver_name(), "postgres");
        assert_eq!(
            Driver::Postgres.dialect().placeholder_style(),
            PlaceholderStyle::DollarNumbered
        );
    }
}
