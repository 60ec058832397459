//! The database handle.
//!
//! [`Database`] wraps a single `rusqlite` connection and exposes record
//! operations built from extracted column metadata:
//!
//! - [`create_table`](Database::create_table), [`insert`](Database::insert),
//!   and [`update`](Database::update) generate their statement text through
//!   the configured [`Driver`] and bind record values positionally.
//! - [`select_all`](Database::select_all) and
//!   [`select_one`](Database::select_one) run caller-written queries and
//!   materialize each row into a record produced by a factory.
//!
//! Every call is synchronous and derives the column list again; the handle
//! keeps no state between calls besides the connection, driver, and policy.
//!
//! # Example
//!
//! ```
//! use neat_core::{Driver, record};
//! use neat_sqlite::Database;
//!
//! record! {
//!     #[derive(Debug, Default, Clone, PartialEq)]
//!     pub struct Client {
//!         pub id: i64 => "id,INT PRIMARY KEY",
//!         pub name: String => "name,VARCHAR(100) NOT NULL",
//!         pub address: String => "address,TEXT NOT NULL",
//!     }
//! }
//!
//! let db = Database::open_in_memory(Driver::Sqlite).unwrap();
//! db.create_table::<Client>().unwrap();
//!
//! let mut client = Client { id: 1, name: "John Doe".into(), ..Default::default() };
//! db.insert(&client).unwrap();
//!
//! client.name = "Mary Jane".into();
//! db.update(&client, "id", client.id).unwrap();
//!
//! let loaded = db
//!     .select_one("SELECT id, name FROM CLIENT WHERE id=?", Client::default, &[1.into()])
//!     .unwrap();
//! assert_eq!(loaded.name, "Mary Jane");
//! ```

use std::path::Path;
use std::time::Duration;

use neat_core::{
    Driver, MappingPolicy, Record, Statement, StatementBuilder, StatementDriver, Value, named_args,
};
use rusqlite::Connection;
use tracing::debug;

use crate::config::NeatConfig;
use crate::convert::{SqlArg, bind_args};
use crate::error::{Result, SqliteError};
use crate::materialize;

/// Outcome of an executed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// Rows changed, inserted, or deleted.
    pub rows_affected: usize,
    /// Rowid of the most recent successful insert on the connection.
    pub last_insert_rowid: i64,
}

/// Record-mapping handle over one SQLite connection.
pub struct Database {
    conn: Connection,
    builder: StatementBuilder<Driver>,
}

impl Database {
    /// Opens the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::UnsupportedDriver`] when the configured driver
    /// is not executed through SQLite, or a client error if the database
    /// cannot be opened or configured.
    pub fn open(config: &NeatConfig) -> Result<Self> {
        check_driver(config.driver)?;
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(&config.path)?
        };
        if config.foreign_keys {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        }
        if let Some(ms) = config.busy_timeout_ms {
            conn.busy_timeout(Duration::from_millis(ms))?;
        }
        debug!(
            path = %config.path.display(),
            driver = config.driver.driver_name(),
            "opened database"
        );
        Ok(Self::wrap(conn, config.driver).with_policy(config.mapping))
    }

    /// Opens a database file with default settings.
    pub fn open_path(driver: Driver, path: impl AsRef<Path>) -> Result<Self> {
        Self::open(&NeatConfig::new(path.as_ref()).with_driver(driver))
    }

    /// Opens a private in-memory database with default settings.
    pub fn open_in_memory(driver: Driver) -> Result<Self> {
        Self::open(&NeatConfig::in_memory().with_driver(driver))
    }

    /// Wraps an already open connection.
    pub fn from_connection(conn: Connection, driver: Driver) -> Result<Self> {
        check_driver(driver)?;
        Ok(Self::wrap(conn, driver))
    }

    fn wrap(conn: Connection, driver: Driver) -> Self {
        Self {
            conn,
            builder: StatementBuilder::new(driver),
        }
    }

    /// Replaces the mapping policy.
    pub fn with_policy(mut self, policy: MappingPolicy) -> Self {
        self.builder = self.builder.with_policy(policy);
        self
    }

    pub fn driver(&self) -> Driver {
        *self.builder.driver()
    }

    pub fn policy(&self) -> MappingPolicy {
        self.builder.policy()
    }

    /// Creates the table for record type `T`.
    pub fn create_table<T: Record>(&self) -> Result<ExecResult> {
        let stmt = self.builder.create_table::<T>()?;
        self.exec(&stmt)
    }

    /// Inserts `model` as a new row.
    pub fn insert<T: Record>(&self, model: &T) -> Result<ExecResult> {
        let stmt = self.builder.insert(model)?;
        self.exec(&stmt)
    }

    /// Updates every mapped column of the row whose `key_field` column
    /// equals `key_value`.
    pub fn update<T: Record>(
        &self,
        model: &T,
        key_field: &str,
        key_value: impl Into<Value>,
    ) -> Result<ExecResult> {
        let stmt = self.builder.update(model, key_field, key_value)?;
        self.exec(&stmt)
    }

    /// Runs `query` and returns one record per result row, in row order.
    ///
    /// `factory` must return a fresh, empty instance on every call. Zero
    /// rows yield an empty vector.
    ///
    /// # Errors
    ///
    /// Client errors are returned as reported. Result columns with no
    /// matching field fail the call only under
    /// [`ColumnPolicy::Reject`](neat_core::ColumnPolicy::Reject).
    pub fn select_all<T, F>(&self, query: &str, factory: F, args: &[Value]) -> Result<Vec<T>>
    where
        T: Record,
        F: FnMut() -> T,
    {
        materialize::select_all(&self.conn, self.policy(), query, factory, args)
    }

    /// Runs `query` and returns the first record.
    ///
    /// Rows beyond the first are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::RecordNotFound`] carrying the query and its
    /// arguments when no row matches.
    pub fn select_one<T, F>(&self, query: &str, factory: F, args: &[Value]) -> Result<T>
    where
        T: Record,
        F: FnMut() -> T,
    {
        self.select_all(query, factory, args)?
            .into_iter()
            .next()
            .ok_or_else(|| SqliteError::RecordNotFound {
                query: query.to_string(),
                args: args.to_vec(),
            })
    }

    /// Executes `sql`, binding the mapped fields of `model` as named
    /// parameters `:dbName`.
    ///
    /// Only parameters that appear in `sql` are bound.
    pub fn execute_named<T: Record>(&self, sql: &str, model: &T) -> Result<ExecResult> {
        let mut stmt = self.conn.prepare(sql)?;
        for (name, value) in named_args(model)? {
            if let Some(index) = stmt.parameter_index(&name)? {
                stmt.raw_bind_parameter(index, SqlArg(&value))?;
            }
        }
        debug!(sql, "executing named statement");
        let rows_affected = stmt.raw_execute()?;
        Ok(self.outcome(rows_affected))
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consumes the handle and returns the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn exec(&self, stmt: &Statement) -> Result<ExecResult> {
        debug!(sql = %stmt.sql, args = stmt.args.len(), "executing statement");
        let rows_affected = self.conn.execute(&stmt.sql, bind_args(&stmt.args))?;
        Ok(self.outcome(rows_affected))
    }

    fn outcome(&self, rows_affected: usize) -> ExecResult {
        ExecResult {
            rows_affected,
            last_insert_rowid: self.conn.last_insert_rowid(),
        }
    }
}

fn check_driver(driver: Driver) -> Result<()> {
    match driver {
        Driver::Sqlite => Ok(()),
        other => Err(SqliteError::UnsupportedDriver(other.driver_name().into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_driver_is_not_executed() {
        let err = Database::open_in_memory(Driver::Postgres).err().unwrap();
        assert!(matches!(err, SqliteError::UnsupportedDriver(ref name) if name == "postgres"));

        let conn = Connection::open_in_memory().unwrap();
        assert!(Database::from_connection(conn, Driver::Postgres).is_err());
    }

    #[test]
    fn test_open_applies_foreign_keys_pragma() {
        let db = Database::open(&NeatConfig::in_memory()).unwrap();
        let enabled: i64 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
