//! Column metadata model.
//!
//! A [`ColumnMetadata`] is the mapping fact for one annotated record field;
//! a [`ColumnList`] is the ordered set of those facts for a record type.
//! The list is the positional basis for both statement placeholders and
//! argument values: the Nth column always pairs with the Nth bound value.

use std::fmt;

use serde::Serialize;

/// Declaration of one record field as written in the record type.
///
/// `annotation` holds the raw `"dbName,declaration"` text, or `None` when
/// the field carries no mapping annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub ident: &'static str,
    pub annotation: Option<&'static str>,
}

impl FieldDef {
    pub const fn new(ident: &'static str, annotation: Option<&'static str>) -> Self {
        Self { ident, annotation }
    }
}

/// Mapping metadata for one record field.
///
/// # Examples
///
/// ```
/// use neat_core::ColumnMetadata;
///
/// let column = ColumnMetadata::new("id", "id", "INT PRIMARY KEY");
/// assert_eq!(column.db_name(), "id");
/// assert_eq!(column.to_string(), "field:id,db_name:id,decl:INT PRIMARY KEY");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMetadata {
    field: String,
    db_name: String,
    declaration: String,
}

impl ColumnMetadata {
    pub fn new(
        field: impl Into<String>,
        db_name: impl Into<String>,
        declaration: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            db_name: db_name.into(),
            declaration: declaration.into(),
        }
    }

    /// Identifier of the record field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Database column name.
    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    /// Column type/constraint text; empty when the annotation gave none.
    pub fn declaration(&self) -> &str {
        &self.declaration
    }
}

impl fmt::Display for ColumnMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field:{},db_name:{},decl:{}",
            self.field, self.db_name, self.declaration
        )
    }
}

/// Ordered column metadata for a record type, in field declaration order.
///
/// Fields skipped for lacking an annotation are not columns, but their
/// identifiers are kept in [`unmapped`](Self::unmapped) so the omission is
/// observable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnList {
    columns: Vec<ColumnMetadata>,
    unmapped: Vec<String>,
}

impl ColumnList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: ColumnMetadata) {
        self.columns.push(column);
    }

    pub(crate) fn push_unmapped(&mut self, field: impl Into<String>) {
        self.unmapped.push(field.into());
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnMetadata> {
        self.columns.iter()
    }

    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }

    /// Identifiers of fields that were left out for lacking an annotation.
    pub fn unmapped(&self) -> &[String] {
        &self.unmapped
    }

    /// First column whose database name equals `db_name`.
    pub fn by_db_name(&self, db_name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.db_name == db_name)
    }

    /// Database name of the column mapped from `field`.
    pub fn db_name_for(&self, field: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.db_name.as_str())
    }
}

impl FromIterator<ColumnMetadata> for ColumnList {
    fn from_iter<I: IntoIterator<Item = ColumnMetadata>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
            unmapped: Vec::new(),
        }
    }
}

impl<'a> IntoIterator for &'a ColumnList {
    type Item = &'a ColumnMetadata;
    type IntoIter = std::slice::Iter<'a, ColumnMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
