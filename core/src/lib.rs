//! Record-to-table mapping primitives.
//!
//! This crate derives table and column metadata from record types and
//! turns it into SQL statement text:
//!
//! - [`Record`]: compile-time schema descriptor, usually declared with
//!   [`record!`]. Each field may carry a `"dbName,declaration"` annotation.
//! - [`extract`]: builds the ordered [`ColumnList`] for a record type.
//! - [`validate_record`]: reports unannotated fields, duplicate columns,
//!   and empty declarations before anything runs.
//! - [`Driver`]: per-database [`StatementDriver`] emitting CREATE, INSERT,
//!   and UPDATE text in the database's [`Dialect`].
//! - [`StatementBuilder`]: pairs generated text with positional
//!   arguments taken from a record instance.
//!
//! Execution and result materialization live in the `neat-sqlite` crate.
//!
//! # Example
//!
//! ```
//! use neat_core::*;
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
//! assert!(validate_record::<Client>().is_empty());
//! assert_eq!(table_name::<Client>(), "CLIENT");
//!
//! let builder = StatementBuilder::new(Driver::Sqlite);
//! let client = Client {
//!     id: 1,
//!     name: "John Doe".into(),
//!     ..Default::default()
//! };
//! let stmt = builder.insert(&client).unwrap();
//! assert_eq!(
//!     stmt.sql,
//!     r#"INSERT INTO "CLIENT" ("id","name","address") VALUES (?,?,?);"#
//! );
//! ```

mod column;
mod driver;
mod error;
mod extract;
mod policy;
mod record;
mod statement;
mod validate;
mod value;

pub use column::{ColumnList, ColumnMetadata, FieldDef};
pub use driver::{Dialect, Driver, PlaceholderStyle, StatementDriver};
pub use error::{Result, SchemaError};
pub use extract::{extract, extract_from, field_to_column, table_name};
pub use policy::{ColumnPolicy, FieldPolicy, MappingPolicy};
pub use record::Record;
pub use statement::{Statement, StatementBuilder, named_args, values_for};
pub use validate::{ValidationError, validate_record};
pub use value::{FieldValue, Value, ValueError, format_args_list};
