//! SQLite database handle for neat records.
//!
//! This crate executes the statements that `neat-core` generates and
//! materializes query results back into record instances.
//!
//! # Architecture
//!
//! The crate is organized into four modules:
//!
//! - **`database`**: the [`Database`] handle (create, insert, update,
//!   select, named execution)
//! - **`materialize`**: binds result columns to record fields and scans rows
//! - **`convert`**: value conversion between neat and SQLite
//! - **`config`**: YAML-loadable [`NeatConfig`]
//!
//! # Quick start
//!
//! ```no_run
//! use neat_core::record;
//! use neat_sqlite::{Database, NeatConfig};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Client {
//!         pub id: i64 => "id,INT PRIMARY KEY",
//!         pub name: String => "name,VARCHAR(100) NOT NULL",
//!     }
//! }
//!
//! let db = Database::open(&NeatConfig::new("clients.db")).unwrap();
//! db.create_table::<Client>().unwrap();
//! db.insert(&Client { id: 1, name: "John Doe".into() }).unwrap();
//!
//! let clients = db
//!     .select_all("SELECT id, name FROM CLIENT", Client::default, &[])
//!     .unwrap();
//! println!("{} clients", clients.len());
//! ```
//!
//! # Configuration
//!
//! [`NeatConfig`] selects the driver, the database path (`:memory:` for a
//! private in-memory database), connection pragmas, and the
//! [`MappingPolicy`](neat_core::MappingPolicy). Only the SQLite driver is
//! executed here; other drivers still generate statement text through
//! `neat-core`.

mod config;
mod convert;
mod database;
mod error;
mod materialize;

pub use config::{IN_MEMORY, NeatConfig};
pub use database::{Database, ExecResult};
pub use error::{Result, SqliteError};
