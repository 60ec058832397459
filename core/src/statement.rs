//! Statement building for record operations.
//!
//! Combines metadata extraction with a [`StatementDriver`] to produce
//! executable SQL text plus its positional arguments. Argument `i` always
//! belongs to column `i` of the extracted [`ColumnList`].

use crate::column::ColumnList;
use crate::driver::StatementDriver;
use crate::error::{Result, SchemaError};
use crate::extract::{extract, table_name};
use crate::policy::MappingPolicy;
use crate::record::Record;
use crate::value::Value;

/// SQL text with the positional arguments to bind.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<Value>,
}

/// Builds statements for records against one driver and mapping policy.
///
/// # Examples
///
/// ```
/// use neat_core::{Driver, StatementBuilder, Value, record};
///
/// record! {
///     #[derive(Default)]
///     pub struct Client {
///         pub id: i64 => "id,INT PRIMARY KEY",
///         pub name: String => "name,VARCHAR(100) NOT NULL",
///     }
/// }
///
/// let builder = StatementBuilder::new(Driver::Sqlite);
/// let client = Client { id: 1, name: "John Doe".into() };
///
/// let insert = builder.insert(&client).unwrap();
/// assert_eq!(insert.sql, r#"INSERT INTO "CLIENT" ("id","name") VALUES (?,?);"#);
/// assert_eq!(insert.args, vec![Value::Integer(1), Value::from("John Doe")]);
///
/// let update = builder.update(&client, "id", 1).unwrap();
/// assert_eq!(update.args.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct StatementBuilder<D> {
    driver: D,
    policy: MappingPolicy,
}

impl<D: StatementDriver> StatementBuilder<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            policy: MappingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MappingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn policy(&self) -> MappingPolicy {
        self.policy
    }

    /// Extracts the columns of `T`, applying the unmapped-field policy.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnmappedFields`] when the policy rejects
    /// unannotated fields and `T` has some.
    pub fn columns<T: Record + ?Sized>(&self) -> Result<ColumnList> {
        let columns = extract::<T>()?;
        self.policy.check_fields(T::type_name(), &columns)?;
        Ok(columns)
    }

    /// `CREATE TABLE` for `T`, with no arguments.
    pub fn create_table<T: Record + ?Sized>(&self) -> Result<Statement> {
        let columns = self.columns::<T>()?;
        let sql = self
            .driver
            .create_table_statement(&table_name::<T>(), &columns)?;
        Ok(Statement {
            sql,
            args: Vec::new(),
        })
    }

    /// `INSERT` of `model`, one argument per column.
    pub fn insert<T: Record>(&self, model: &T) -> Result<Statement> {
        let columns = self.columns::<T>()?;
        let args = values_for(&columns, model)?;
        let sql = self.driver.insert_statement(&table_name::<T>(), &columns)?;
        Ok(Statement { sql, args })
    }

    /// `UPDATE` of `model` keyed on `key_field`; `key_value` is bound last.
    pub fn update<T: Record>(
        &self,
        model: &T,
        key_field: &str,
        key_value: impl Into<Value>,
    ) -> Result<Statement> {
        let columns = self.columns::<T>()?;
        let mut args = values_for(&columns, model)?;
        let sql = self
            .driver
            .update_statement(&table_name::<T>(), &columns, key_field)?;
        args.push(key_value.into());
        Ok(Statement { sql, args })
    }
}

/// Current values of `model` for each column, in column order.
///
/// # Errors
///
/// Returns [`SchemaError::UnknownField`] if the record does not expose a
/// column's field.
pub fn values_for<T: Record>(columns: &ColumnList, model: &T) -> Result<Vec<Value>> {
    columns
        .iter()
        .map(|c| {
            model
                .field_value(c.field())
                .ok_or_else(|| SchemaError::UnknownField {
                    record: T::type_name().to_string(),
                    field: c.field().to_string(),
                })
        })
        .collect()
}

/// Mapped field values of `model` keyed by `:dbName` parameter names.
///
/// Used to bind a record to hand-written statements with named parameters.
pub fn named_args<T: Record>(model: &T) -> Result<Vec<(String, Value)>> {
    let columns = extract::<T>()?;
    let values = values_for(&columns, model)?;
    Ok(columns
        .iter()
        .zip(values)
        .map(|(c, v)| (format!(":{}", c.db_name()), v))
        .collect())
}
