//! Schema-driven statement generation.
//!
//! Every data value is a positional `?` placeholder. Each builder returns a
//! [`Statement`] whose [`params`](Statement::params) list the order in which the
//! caller must bind values.

use crate::config::{DEFAULT_SELECT_ALIAS, DEFAULT_UPDATE_ALIAS};
use crate::error::{SchemaSqlError, SchemaSqlResult};
use crate::filter::Filter;
use crate::ident::checked;
use crate::selector::Selector;
use crate::table::TableSchema;
use std::fmt;

/// Positional placeholder marker.
pub const PLACEHOLDER: &str = "?";

/// What a bound value is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamRole {
    /// Value written to a column (INSERT values, UPDATE SET).
    Value,
    /// Primary-key value identifying the row (UPDATE WHERE).
    Key,
    /// Right-hand side of a filter comparison.
    Comparison,
    /// Lower bound of a BETWEEN comparison.
    RangeStart,
    /// Upper bound of a BETWEEN comparison.
    RangeEnd,
}

/// One placeholder in a statement: the column it refers to and its role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamSlot {
    pub column: String,
    pub role: ParamRole,
}

impl ParamSlot {
    pub fn new(column: impl Into<String>, role: ParamRole) -> Self {
        Self {
            column: column.into(),
            role,
        }
    }
}

/// Generated SQL text plus the expected binding order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<ParamSlot>,
}

impl Statement {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[ParamSlot] {
        &self.params
    }

    /// Column names in binding order.
    pub fn param_columns(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.column.as_str())
    }

    pub fn placeholder_count(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

fn qualified(target_schema: &str, table: &str) -> SchemaSqlResult<String> {
    Ok(format!("{}.{}", checked(target_schema)?, checked(table)?))
}

fn placeholders(n: usize) -> String {
    vec![PLACEHOLDER; n].join(", ")
}

fn log_built(kind: &'static str, table: &str, stmt: &Statement) {
    tracing::debug!(
        target: "schemasql.statement",
        kind,
        table,
        params = stmt.params.len(),
        "built statement"
    );
}

/// Build `INSERT INTO <target>.<table>(<cols>) VALUES (?, ...)` over the
/// insertable (non-identity) columns, in schema order.
///
/// # Example
///
/// ```
/// use schemasql::{Column, TableSchema, build_insert};
///
/// let orders = TableSchema::new("Orders", vec![
///     Column::new("OrderId", "int identity", 0).primary_key(true),
///     Column::new("CustomerId", "int", 1),
///     Column::new("Amount", "decimal", 2),
/// ])?;
/// let stmt = build_insert(&orders, "dbo")?;
/// assert_eq!(stmt.sql, "INSERT INTO dbo.Orders(CustomerId, Amount) VALUES (?, ?)");
/// # Ok::<(), schemasql::SchemaSqlError>(())
/// ```
pub fn build_insert(schema: &TableSchema, target_schema: &str) -> SchemaSqlResult<Statement> {
    let columns = schema.insertable_column_names();
    if columns.is_empty() {
        return Err(SchemaSqlError::NoInsertableColumns(
            schema.table_name().to_string(),
        ));
    }

    let sql = format!(
        "INSERT INTO {}({}) VALUES ({})",
        qualified(target_schema, schema.table_name())?,
        columns.join(", "),
        placeholders(columns.len())
    );
    let params = columns
        .iter()
        .map(|c| ParamSlot::new(c.as_str(), ParamRole::Value))
        .collect();

    let stmt = Statement { sql, params };
    log_built("insert", schema.table_name(), &stmt);
    Ok(stmt)
}

/// Build an UPDATE keyed on the primary key, using the default `table` alias.
///
/// Non-key placeholders come first, then key placeholders; bind in that order.
pub fn build_update(schema: &TableSchema, target_schema: &str) -> SchemaSqlResult<Statement> {
    build_update_aliased(schema, target_schema, DEFAULT_UPDATE_ALIAS)
}

/// [`build_update`] with an explicit table alias.
pub fn build_update_aliased(
    schema: &TableSchema,
    target_schema: &str,
    alias: &str,
) -> SchemaSqlResult<Statement> {
    let table = schema.table_name();
    let keys = schema.key_column_names();
    if keys.is_empty() {
        return Err(SchemaSqlError::NoKeyColumns(table.to_string()));
    }
    let fields = schema.non_key_column_names();
    if fields.is_empty() {
        return Err(SchemaSqlError::NoUpdatableColumns(table.to_string()));
    }
    let alias = checked(alias)?;

    let set = fields
        .iter()
        .map(|c| format!("{alias}.{c}={PLACEHOLDER}"))
        .collect::<Vec<_>>()
        .join(", ");
    let predicate = keys
        .iter()
        .map(|c| format!("{c}={PLACEHOLDER}"))
        .collect::<Vec<_>>()
        .join(" AND ");

    let sql = format!(
        "UPDATE {alias} SET {set} FROM {} {alias} WHERE {predicate}",
        qualified(target_schema, table)?
    );
    let params = fields
        .iter()
        .map(|c| ParamSlot::new(c.as_str(), ParamRole::Value))
        .chain(keys.iter().map(|c| ParamSlot::new(c.as_str(), ParamRole::Key)))
        .collect();

    let stmt = Statement { sql, params };
    log_built("update", table, &stmt);
    Ok(stmt)
}

/// Assemble `SELECT <column_list> FROM <target>.<table> t WHERE <where_fragment>`.
///
/// This is text assembly only: `column_list` and `where_fragment` are expected
/// to come from a [`Selector`] and a [`Filter`]. A blank `where_fragment`
/// omits the WHERE keyword. The returned statement carries no parameter slots;
/// use [`build_select_from`] to keep the filter's binding order.
pub fn build_select(
    table_name: &str,
    target_schema: &str,
    column_list: &str,
    where_fragment: &str,
) -> SchemaSqlResult<Statement> {
    let sql = select_sql(
        table_name,
        target_schema,
        DEFAULT_SELECT_ALIAS,
        column_list,
        where_fragment,
    )?;
    let stmt = Statement {
        sql,
        params: Vec::new(),
    };
    log_built("select", table_name, &stmt);
    Ok(stmt)
}

/// Build a SELECT from a [`Selector`] and an optional [`Filter`], carrying the
/// filter's parameter slots. The selector's alias names the table.
pub fn build_select_from(
    table_name: &str,
    target_schema: &str,
    selector: &Selector,
    filter: Option<&Filter>,
) -> SchemaSqlResult<Statement> {
    let alias = selector.alias().unwrap_or(DEFAULT_SELECT_ALIAS);
    select_statement(table_name, target_schema, alias, selector, filter)
}

/// SELECT over `<target>.<table> <alias>` using the selector's column list and
/// the filter's fragment and slots.
pub(crate) fn select_statement(
    table_name: &str,
    target_schema: &str,
    alias: &str,
    selector: &Selector,
    filter: Option<&Filter>,
) -> SchemaSqlResult<Statement> {
    let where_fragment = filter.map(Filter::as_str).unwrap_or("");
    let sql = select_sql(
        table_name,
        target_schema,
        alias,
        selector.as_str(),
        where_fragment,
    )?;
    let params = filter.map(|f| f.params().to_vec()).unwrap_or_default();

    let stmt = Statement { sql, params };
    log_built("select", table_name, &stmt);
    Ok(stmt)
}

pub(crate) fn select_sql(
    table_name: &str,
    target_schema: &str,
    alias: &str,
    column_list: &str,
    where_fragment: &str,
) -> SchemaSqlResult<String> {
    if column_list.trim().is_empty() {
        return Err(SchemaSqlError::EmptySelectList);
    }
    let mut sql = format!(
        "SELECT {column_list} FROM {} {}",
        qualified(target_schema, table_name)?,
        checked(alias)?
    );
    if !where_fragment.trim().is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(where_fragment);
    }
    Ok(sql)
}
