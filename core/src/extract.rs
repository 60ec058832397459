//! Metadata extraction from record descriptors.
//!
//! Visits a record type's fields in declaration order and turns each
//! annotated field into a [`ColumnMetadata`]. An annotation has the form
//! `"dbName,declaration"`:
//!
//! - `dbName` defaults to the lowercased field identifier when blank.
//! - `declaration` is everything after the first comma, so it may contain
//!   commas of its own (`DECIMAL(10,2)`); it is empty when absent.
//!
//! A field without an annotation fails extraction on its own and is left
//! out of the resulting [`ColumnList`]; the list records it under
//! [`ColumnList::unmapped`]. Nothing is cached: every call derives the
//! list again.

use tracing::debug;

use crate::column::{ColumnList, ColumnMetadata, FieldDef};
use crate::error::{Result, SchemaError};
use crate::record::Record;

/// Converts one field declaration into column metadata.
///
/// # Errors
///
/// Returns [`SchemaError::UnmappedFields`] naming the field when it has no
/// annotation.
pub fn field_to_column(record: &str, field: &FieldDef) -> Result<ColumnMetadata> {
    let Some(annotation) = field.annotation else {
        return Err(SchemaError::UnmappedFields {
            record: record.to_string(),
            fields: vec![field.ident.to_string()],
        });
    };

    let mut parts = annotation.splitn(2, ',');
    let db_name = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| field.ident.to_lowercase(), str::to_string);
    let declaration = parts.next().map(str::trim).unwrap_or_default();

    Ok(ColumnMetadata::new(field.ident, db_name, declaration))
}

/// Extracts the ordered column list for record type `T`.
///
/// # Errors
///
/// Returns [`SchemaError::UnsupportedType`] when `T` does not name a
/// usable record type (its type name is not a plain identifier).
///
/// # Examples
///
/// ```
/// use neat_core::{extract, record};
///
/// record! {
///     #[derive(Default)]
///     pub struct Client {
///         pub id: i64 => "id,INT PRIMARY KEY",
///         pub name: String => "full_name,TEXT",
///         pub cache: String,
///     }
/// }
///
/// let columns = extract::<Client>().unwrap();
/// assert_eq!(columns.len(), 2);
/// assert_eq!(columns.columns()[1].db_name(), "full_name");
/// assert_eq!(columns.unmapped(), ["cache".to_string()]);
/// ```
pub fn extract<T: Record + ?Sized>() -> Result<ColumnList> {
    let record = T::type_name();
    if !is_plain_identifier(record) {
        return Err(SchemaError::UnsupportedType(record.to_string()));
    }

    let fields = T::fields();
    let mut columns = ColumnList::new();
    for field in fields {
        match field_to_column(record, field) {
            Ok(column) => columns.push(column),
            Err(_) => {
                debug!(
                    record,
                    field = field.ident,
                    "skipping field without mapping annotation"
                );
                columns.push_unmapped(field.ident);
            }
        }
    }
    Ok(columns)
}

/// Extracts the column list for the record type of `model`.
///
/// Works through indirection such as `Box<T>`, reaching the underlying
/// record type.
pub fn extract_from<T: Record>(_model: &T) -> Result<ColumnList> {
    extract::<T>()
}

/// Table name for record type `T`: the uppercased type name.
pub fn table_name<T: Record + ?Sized>() -> String {
    T::type_name().to_uppercase()
}

/// Letters, digits, and underscores, not starting with a digit.
pub(crate) fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    crate::record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Client {
            id: i64 => "id,INT PRIMARY KEY",
            name: String => "name,VARCHAR(100) NOT NULL",
            address: String => "address,TEXT NOT NULL",
        }
    }

    crate::record! {
        #[derive(Debug, Default)]
        #[allow(non_snake_case)]
        struct Invoice {
            Number: i64 => ",INTEGER",
            total: f64 => "amount,DECIMAL(10,2)",
            memo: String,
            Paid: bool => "",
        }
    }

    struct Nameless;

    impl Record for Nameless {
        fn type_name() -> &'static str {
            "&[u8]"
        }
        fn fields() -> &'static [FieldDef] {
            &[]
        }
        fn field_value(&self, _field: &str) -> Option<Value> {
            None
        }
        fn set_field_value(&mut self, field: &str, _value: Value) -> Result<()> {
            Err(SchemaError::UnknownField {
                record: "Nameless".into(),
                field: field.into(),
            })
        }
    }

    #[test]
    fn test_all_annotated_fields_in_order() {
        let columns = extract::<Client>().unwrap();
        assert_eq!(columns.len(), Client::fields().len());
        let names: Vec<_> = columns.iter().map(|c| c.db_name()).collect();
        assert_eq!(names, vec!["id", "name", "address"]);
        assert_eq!(columns.columns()[1].declaration(), "VARCHAR(100) NOT NULL");
        assert!(columns.unmapped().is_empty());
    }

    #[test]
    fn test_unannotated_field_is_excluded() {
        let columns = extract::<Invoice>().unwrap();
        assert!(columns.iter().all(|c| c.field() != "memo"));
        assert_eq!(columns.unmapped(), ["memo".to_string()]);
        assert_eq!(columns.len(), 3);
    }

    #[test]
    fn test_blank_segments_fall_back_to_defaults() {
        let columns = extract::<Invoice>().unwrap();
        let number = &columns.columns()[0];
        assert_eq!(number.db_name(), "number");
        assert_eq!(number.declaration(), "INTEGER");

        let paid = &columns.columns()[2];
        assert_eq!(paid.db_name(), "paid");
        assert_eq!(paid.declaration(), "");
    }

    #[test]
    fn test_declaration_keeps_inner_commas() {
        let columns = extract::<Invoice>().unwrap();
        assert_eq!(columns.columns()[1].declaration(), "DECIMAL(10,2)");
        assert_eq!(columns.columns()[1].db_name(), "amount");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        assert_eq!(extract::<Client>().unwrap(), extract::<Client>().unwrap());
    }

    #[test]
    fn test_extract_through_box() {
        let boxed = Box::new(Client::default());
        assert_eq!(extract_from(&boxed).unwrap(), extract::<Client>().unwrap());
    }

    #[test]
    fn test_unsupported_type() {
        let err = extract::<Nameless>().unwrap_err();
        assert_eq!(err, SchemaError::UnsupportedType("&[u8]".into()));
    }

    #[test]
    fn test_field_to_column_without_annotation() {
        let err = field_to_column("Client", &FieldDef::new("notes", None))
            .unwrap_err();
        match err {
            SchemaError::UnmappedFields { fields, .. } => assert_eq!(fields, vec!["notes"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_table_name_is_uppercase() {
        assert_eq!(table_name::<Client>(), "CLIENT");
        assert_eq!(table_name::<Box<Invoice>>(), "INVOICE");
    }
}
