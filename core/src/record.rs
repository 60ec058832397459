//! The [`Record`] schema descriptor and the [`record!`](crate::record) macro.
//!
//! A record type describes its own fields at compile time instead of being
//! inspected at runtime. The descriptor lists every field in declaration
//! order together with its optional `"dbName,declaration"` annotation, and
//! gives by-name access to field values for binding and scanning.

use crate::column::FieldDef;
use crate::error::Result;
use crate::value::Value;

/// A type whose fields can be mapped to table columns.
///
/// Usually implemented through [`record!`](crate::record). Implementations
/// must list fields in declaration order; the order becomes column order.
pub trait Record {
    /// Name of the record type; the table name is its uppercase form.
    fn type_name() -> &'static str;

    /// Every declared field, in declaration order.
    fn fields() -> &'static [FieldDef];

    /// Current value of the mapped `field`, or `None` if no annotated field
    /// has that name.
    fn field_value(&self, field: &str) -> Option<Value>;

    /// Stores `value` into `field`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownField`](crate::SchemaError::UnknownField)
    /// for an undeclared or unannotated field, or
    /// [`SchemaError::Conversion`](crate::SchemaError::Conversion) when the
    /// value does not fit the field's type.
    fn set_field_value(&mut self, field: &str, value: Value) -> Result<()>;
}

impl<R: Record> Record for Box<R> {
    fn type_name() -> &'static str {
        R::type_name()
    }

    fn fields() -> &'static [FieldDef] {
        R::fields()
    }

    fn field_value(&self, field: &str) -> Option<Value> {
        (**self).field_value(field)
    }

    fn set_field_value(&mut self, field: &str, value: Value) -> Result<()> {
        (**self).set_field_value(field, value)
    }
}

/// Declares a struct and implements [`Record`] for it.
///
/// Mapped fields carry their annotation after the type, as
/// `=> "dbName,declaration"`. Either segment may be blank. Fields without
/// an annotation are still declared but are not mapped to a column; they
/// get no by-name accessor and may be of any type.
///
/// # Examples
///
/// ```
/// use neat_core::{Record, record};
///
/// record! {
///     #[derive(Debug, Default, Clone, PartialEq)]
///     pub struct Client {
///         pub id: i64 => "id,INT PRIMARY KEY",
///         pub name: String => "name,VARCHAR(100) NOT NULL",
///         pub address: String => "address,TEXT NOT NULL",
///         pub scratch: String,
///     }
/// }
///
/// assert_eq!(Client::type_name(), "Client");
/// assert_eq!(Client::fields().len(), 4);
/// assert_eq!(Client::fields()[3].annotation, None);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $annotation:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn type_name() -> &'static str {
                stringify!($name)
            }

            fn fields() -> &'static [$crate::FieldDef] {
                const FIELDS: &[$crate::FieldDef] = &[
                    $(
                        $crate::FieldDef::new(
                            stringify!($field),
                            $crate::__neat_annotation!($($annotation)?),
                        ),
                    )*
                ];
                FIELDS
            }

            #[allow(unused_variables)]
            fn field_value(&self, field: &str) -> ::core::option::Option<$crate::Value> {
                $(
                    $crate::__neat_get!(self, field, $field $(, $annotation)?);
                )*
                ::core::option::Option::None
            }

            #[allow(unused_variables)]
            fn set_field_value(
                &mut self,
                field: &str,
                value: $crate::Value,
            ) -> $crate::Result<()> {
                $(
                    $crate::__neat_set!(self, field, value, $field $(, $annotation)?);
                )*
                ::core::result::Result::Err($crate::SchemaError::UnknownField {
                    record: stringify!($name).to_string(),
                    field: field.to_string(),
                })
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __neat_annotation {
    () => {
        ::core::option::Option::None
    };
    ($annotation:literal) => {
        ::core::option::Option::Some($annotation)
    };
}

// Unannotated fields get no accessor, so their types need not be `FieldValue`.
#[doc(hidden)]
#[macro_export]
macro_rules! __neat_get {
    ($target:expr, $name:ident, $field:ident) => {};
    ($target:expr, $name:ident, $field:ident, $annotation:literal) => {
        if $name == stringify!($field) {
            return ::core::option::Option::Some($crate::FieldValue::to_value(&$target.$field));
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __neat_set {
    ($target:expr, $name:ident, $value:ident, $field:ident) => {};
    ($target:expr, $name:ident, $value:ident, $field:ident, $annotation:literal) => {
        if $name == stringify!($field) {
            $target.$field =
                $crate::FieldValue::from_value($value).map_err(|e| e.for_field($name))?;
            return ::core::result::Result::Ok(());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SchemaError;

    crate::record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Account {
            /// Primary key.
            id: i64 => "id,INTEGER PRIMARY KEY",
            owner: String => ",TEXT NOT NULL",
            balance: Option<f64> => "bal",
            note: String,
        }
    }

    #[test]
    fn test_fields_in_declaration_order() {
        let idents: Vec<_> = Account::fields().iter().map(|f| f.ident).collect();
        assert_eq!(idents, vec!["id", "owner", "balance", "note"]);
        assert_eq!(Account::fields()[1].annotation, Some(",TEXT NOT NULL"));
        assert_eq!(Account::fields()[3].annotation, None);
    }

    #[test]
    fn test_field_value_round_trip() {
        let mut account = Account::default();
        account.set_field_value("id", Value::Integer(7)).unwrap();
        account.set_field_value("balance", Value::Real(12.5)).unwrap();
        assert_eq!(account.id, 7);
        assert_eq!(account.balance, Some(12.5));
        assert_eq!(account.field_value("owner"), Some(Value::from("")));
        assert_eq!(account.field_value("missing"), None);
    }

    #[test]
    fn test_set_unknown_field() {
        let mut account = Account::default();
        let err = account.set_field_value("missing", Value::Null).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownField {
                record: "Account".into(),
                field: "missing".into(),
            }
        );
    }

    #[test]
    fn test_set_wrong_type() {
        let mut account = Account::default();
        let err = account
            .set_field_value("id", Value::Text("seven".into()))
            .unwrap_err();
        assert!(matches!(err, SchemaError::Conversion { ref field, .. } if field == "id"));
    }

    crate::record! {
        #[derive(Debug, Default)]
        struct Cached {
            id: i64 => "id,INT PRIMARY KEY",
            tags: Vec<String>,
            lookup: std::collections::HashMap<String, u32>,
        }
    }

    #[test]
    fn test_unannotated_fields_may_be_any_type() {
        let mut cached = Cached {
            tags: vec!["a".into()],
            ..Default::default()
        };
        cached.set_field_value("id", Value::Integer(3)).unwrap();
        assert_eq!(cached.field_value("id"), Some(Value::Integer(3)));

        assert_eq!(cached.field_value("tags"), None);
        let err = cached.set_field_value("tags", Value::Null).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownField { ref field, .. } if field == "tags"));
        assert_eq!(cached.tags, vec!["a".to_string()]);
        assert!(cached.lookup.is_empty());

        let idents: Vec<_> = Cached::fields().iter().map(|f| f.ident).collect();
        assert_eq!(idents, vec!["id", "tags", "lookup"]);
    }

    #[test]
    fn test_boxed_record_forwards() {
        let mut boxed = Box::new(Account::default());
        boxed.set_field_value("owner", Value::from("ana")).unwrap();
        assert_eq!(<Box<Account> as Record>::type_name(), "Account");
        assert_eq!(boxed.owner, "ana");
    }
}
