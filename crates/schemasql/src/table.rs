//! Table metadata model.
//!
//! A [`TableSchema`] is built once per table lookup and is read-only afterwards,
//! so it can be shared (`Arc`) and reused for the lifetime of the process.

use crate::column::{Column, DEFAULT_IDENTITY_MARKER};
use crate::error::{SchemaSqlError, SchemaSqlResult};
use crate::ident::{Ident, checked_part};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One table described as an ordered collection of [`Column`]s.
///
/// Columns are kept in ordinal order. The key / non-key / auto / insertable
/// name lists are derived once at construction.
///
/// # Example
///
/// ```
/// use schemasql::{Column, TableSchema};
///
/// let orders = TableSchema::new(
///     "Orders",
///     vec![
///         Column::new("OrderId", "int identity", 0).primary_key(true),
///         Column::new("CustomerId", "int", 1),
///         Column::new("Amount", "decimal", 2),
///     ],
/// )?;
/// assert_eq!(orders.insertable_column_names(), ["CustomerId", "Amount"]);
/// assert_eq!(orders.key_column_names(), ["OrderId"]);
/// # Ok::<(), schemasql::SchemaSqlError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTableSchema", into = "RawTableSchema")]
pub struct TableSchema {
    table_name: String,
    identity_marker: String,
    columns: Vec<Column>,
    key_columns: Vec<String>,
    non_key_columns: Vec<String>,
    auto_columns: Vec<String>,
    insertable_columns: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct RawTableSchema {
    table_name: String,
    #[serde(default = "default_marker")]
    identity_marker: String,
    columns: Vec<Column>,
}

fn default_marker() -> String {
    DEFAULT_IDENTITY_MARKER.to_string()
}

impl TryFrom<RawTableSchema> for TableSchema {
    type Error = SchemaSqlError;

    fn try_from(raw: RawTableSchema) -> SchemaSqlResult<Self> {
        Self::with_identity_marker(raw.table_name, raw.columns, &raw.identity_marker)
    }
}

impl From<TableSchema> for RawTableSchema {
    fn from(schema: TableSchema) -> Self {
        Self {
            table_name: schema.table_name,
            identity_marker: schema.identity_marker,
            columns: schema.columns,
        }
    }
}

impl TableSchema {
    /// Build a schema using the default identity marker.
    pub fn new(table_name: impl Into<String>, columns: Vec<Column>) -> SchemaSqlResult<Self> {
        Self::with_identity_marker(table_name, columns, DEFAULT_IDENTITY_MARKER)
    }

    /// Build a schema, treating columns whose type name contains `marker` as
    /// auto-generated.
    ///
    /// Columns are stably sorted by ordinal position. Fails with
    /// [`SchemaSqlError::InvalidSchema`] when there are no columns, a column
    /// name repeats, or two columns share an ordinal position, and with
    /// [`SchemaSqlError::InvalidIdentifier`] when a name is not a valid identifier.
    pub fn with_identity_marker(
        table_name: impl Into<String>,
        mut columns: Vec<Column>,
        marker: &str,
    ) -> SchemaSqlResult<Self> {
        let table_name = table_name.into();
        Ident::parse(&table_name)?;

        if columns.is_empty() {
            return Err(SchemaSqlError::invalid_schema(format!(
                "table '{table_name}' has no columns"
            )));
        }

        columns.sort_by_key(Column::ordinal_position);

        let mut seen = HashSet::with_capacity(columns.len());
        for (i, col) in columns.iter().enumerate() {
            checked_part(col.name())?;
            if !seen.insert(col.name()) {
                return Err(SchemaSqlError::invalid_schema(format!(
                    "duplicate column '{}' in table '{table_name}'",
                    col.name()
                )));
            }
            if i > 0 && columns[i - 1].ordinal_position() == col.ordinal_position() {
                return Err(SchemaSqlError::invalid_schema(format!(
                    "columns '{}' and '{}' of table '{table_name}' share ordinal position {}",
                    columns[i - 1].name(),
                    col.name(),
                    col.ordinal_position()
                )));
            }
        }

        let names = |keep: &dyn Fn(&Column) -> bool| -> Vec<String> {
            columns
                .iter()
                .filter(|c| keep(*c))
                .map(|c| c.name().to_string())
                .collect()
        };

        let key_columns = names(&|c: &Column| c.is_primary_key());
        let non_key_columns = names(&|c: &Column| !c.is_primary_key());
        let auto_columns = names(&|c: &Column| c.is_identity_with(marker));
        let insertable_columns = names(&|c: &Column| !c.is_identity_with(marker));

        Ok(Self {
            table_name,
            identity_marker: marker.to_string(),
            columns,
            key_columns,
            non_key_columns,
            auto_columns,
            insertable_columns,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Type-name marker used to classify auto-generated columns.
    pub fn identity_marker(&self) -> &str {
        &self.identity_marker
    }

    /// Columns in ordinal order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// All column names in ordinal order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Primary-key column names, in ordinal order.
    pub fn key_column_names(&self) -> &[String] {
        &self.key_columns
    }

    /// Columns outside the primary key, in ordinal order.
    pub fn non_key_column_names(&self) -> &[String] {
        &self.non_key_columns
    }

    /// Identity (database-generated) column names.
    pub fn auto_column_names(&self) -> &[String] {
        &self.auto_columns
    }

    /// Columns an INSERT must supply values for.
    pub fn insertable_column_names(&self) -> &[String] {
        &self.insertable_columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false` for a constructed schema; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
