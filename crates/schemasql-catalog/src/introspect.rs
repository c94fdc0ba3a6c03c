//! PostgreSQL system-catalog introspection.

use crate::client::CatalogClient;
use crate::error::{CatalogError, CatalogResult};
use schemasql::{
    Column, DEFAULT_IDENTITY_MARKER, Ident, IdentPart, SchemaProvider, SchemaSqlError,
    SchemaSqlResult, TableSchema,
};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

const COLUMNS_SQL: &str = r#"
SELECT
  a.attname AS column_name,
  a.attnum::int4 AS ordinal,
  pg_catalog.format_type(a.atttypid, a.atttypmod) AS data_type,
  a.attnotnull AS not_null,
  (a.attidentity::text <> ''
    OR COALESCE(pg_get_expr(ad.adbin, ad.adrelid), '') LIKE 'nextval(%') AS is_identity
FROM pg_catalog.pg_class c
JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
JOIN pg_catalog.pg_attribute a ON a.attrelid = c.oid
LEFT JOIN pg_catalog.pg_attrdef ad ON ad.adrelid = c.oid AND ad.adnum = a.attnum
WHERE c.relkind IN ('r', 'p', 'v', 'm', 'f')
  AND a.attnum > 0
  AND NOT a.attisdropped
  AND n.nspname = $1
  AND c.relname = $2
ORDER BY a.attnum
"#;

const PRIMARY_KEY_SQL: &str = r#"
SELECT a.attname AS column_name
FROM pg_catalog.pg_index i
JOIN pg_catalog.pg_class c ON c.oid = i.indrelid
JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
JOIN pg_catalog.pg_attribute a ON a.attrelid = c.oid AND a.attnum = ANY(i.indkey)
WHERE i.indisprimary
  AND n.nspname = $1
  AND c.relname = $2
ORDER BY a.attnum
"#;

const TABLES_SQL: &str = r#"
SELECT c.relname AS table_name
FROM pg_catalog.pg_class c
JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
WHERE c.relkind IN ('r', 'p')
  AND n.nspname = $1
ORDER BY c.relname
"#;

const FINGERPRINT_SQL: &str = r#"
SELECT
  md5(
    COALESCE(
      string_agg(
        concat_ws(
          '|',
          c.relname,
          c.relkind::text,
          a.attnum::text,
          a.attname,
          pg_catalog.format_type(a.atttypid, a.atttypmod),
          a.attnotnull::text,
          COALESCE(a.attidentity::text, ''),
          COALESCE(pg_get_expr(ad.adbin, ad.adrelid), ''),
          EXISTS (
            SELECT 1 FROM pg_catalog.pg_index i
            WHERE i.indrelid = c.oid AND i.indisprimary AND a.attnum = ANY(i.indkey)
          )::text
        ),
        E'\n' ORDER BY c.relname, a.attnum
      ),
      ''
    )
  ) AS fingerprint
FROM pg_catalog.pg_class c
JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
JOIN pg_catalog.pg_attribute a ON a.attrelid = c.oid
LEFT JOIN pg_catalog.pg_attrdef ad ON ad.adrelid = c.oid AND ad.adnum = a.attnum
WHERE c.relkind IN ('r', 'p')
  AND a.attnum > 0
  AND NOT a.attisdropped
  AND n.nspname = $1
"#;

fn get<'a, T: FromSql<'a>>(row: &'a Row, column: &str) -> CatalogResult<T> {
    row.try_get(column)
        .map_err(|e| CatalogError::decode(column, e.to_string()))
}

/// SQL spelling of a raw catalog name: unchanged when it is a bare identifier,
/// double-quoted otherwise (`order items` becomes `"order items"`).
pub fn sql_name(raw: &str) -> String {
    match Ident::parse(raw) {
        Ok(ident) if matches!(ident.parts.as_slice(), [IdentPart::Unquoted(p)] if p == raw) => {
            raw.to_string()
        }
        _ => format!("\"{}\"", raw.replace('"', "\"\"")),
    }
}

/// Raw catalog name for a table given either bare or in its quoted spelling.
fn catalog_name(name: &str) -> String {
    match Ident::parse(name).map(|ident| ident.parts) {
        Ok(parts) => match parts.as_slice() {
            [IdentPart::Quoted(raw)] => raw.clone(),
            _ => name.to_string(),
        },
        Err(_) => name.to_string(),
    }
}

/// One row of the column query, before it becomes a [`Column`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumn {
    pub name: String,
    /// 1-based `attnum`.
    pub ordinal: i32,
    pub data_type: String,
    pub not_null: bool,
    /// Identity column or serial (`nextval(...)` default).
    pub is_identity: bool,
}

impl CatalogColumn {
    fn from_row(row: &Row) -> CatalogResult<Self> {
        Ok(Self {
            name: get(row, "column_name")?,
            ordinal: get(row, "ordinal")?,
            data_type: get(row, "data_type")?,
            not_null: get(row, "not_null")?,
            is_identity: get(row, "is_identity")?,
        })
    }

    /// Convert to a [`Column`]; identity columns carry the identity marker in
    /// their type name, and the name is spelled per [`sql_name`].
    pub fn into_column(self, is_primary_key: bool) -> CatalogResult<Column> {
        let ordinal = u32::try_from(self.ordinal - 1).map_err(|_| {
            CatalogError::decode("ordinal", format!("invalid attnum {}", self.ordinal))
        })?;
        let type_name = if self.is_identity {
            format!("{} {DEFAULT_IDENTITY_MARKER}", self.data_type)
        } else {
            self.data_type
        };
        Ok(Column::new(sql_name(&self.name), type_name, ordinal)
            .nullable(!self.not_null)
            .primary_key(is_primary_key))
    }
}

/// Assemble a [`TableSchema`] from catalog rows.
///
/// `table_name` and `key_columns` are raw catalog names; names that are not
/// bare identifiers end up quoted. No columns means the table does not exist
/// (or is not visible).
pub fn build_table_schema(
    table_name: &str,
    columns: Vec<CatalogColumn>,
    key_columns: &[String],
) -> CatalogResult<TableSchema> {
    if columns.is_empty() {
        return Err(SchemaSqlError::schema_not_found(table_name).into());
    }
    let columns = columns
        .into_iter()
        .map(|c| {
            let is_key = key_columns.iter().any(|k| *k == c.name);
            c.into_column(is_key)
        })
        .collect::<CatalogResult<Vec<_>>>()?;
    Ok(TableSchema::new(sql_name(table_name), columns)?)
}

/// [`SchemaProvider`] backed by a live PostgreSQL catalog.
///
/// Each lookup runs two read-only queries (columns, then primary key). Wrap
/// in [`schemasql::CachedSchemaProvider`] to memoize.
pub struct PgCatalogProvider<C> {
    client: C,
    namespace: String,
}

impl<C: CatalogClient> PgCatalogProvider<C> {
    pub fn new(client: C, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Describe one table. `table_name` may be the raw catalog name or its
    /// quoted spelling.
    pub async fn describe(&self, table_name: &str) -> CatalogResult<TableSchema> {
        let table_name = catalog_name(table_name);
        let rows = self
            .client
            .query(COLUMNS_SQL, &[&self.namespace, &table_name])
            .await?;
        let columns = rows
            .iter()
            .map(CatalogColumn::from_row)
            .collect::<CatalogResult<Vec<_>>>()?;

        let key_rows = self
            .client
            .query(PRIMARY_KEY_SQL, &[&self.namespace, &table_name])
            .await?;
        let keys = key_rows
            .iter()
            .map(|r| get::<String>(r, "column_name"))
            .collect::<CatalogResult<Vec<_>>>()?;

        tracing::debug!(
            target: "schemasql_catalog",
            namespace = %self.namespace,
            table = %table_name,
            columns = columns.len(),
            keys = keys.len(),
            "described table"
        );
        build_table_schema(&table_name, columns, &keys)
    }

    /// Names of the ordinary and partitioned tables in the namespace.
    pub async fn list_tables(&self) -> CatalogResult<Vec<String>> {
        let rows = self.client.query(TABLES_SQL, &[&self.namespace]).await?;
        rows.iter()
            .map(|r| get::<String>(r, "table_name"))
            .collect()
    }

    /// Describe every table in the namespace.
    ///
    /// Tables without columns are skipped.
    pub async fn load_all(&self) -> CatalogResult<Vec<TableSchema>> {
        let mut tables = Vec::new();
        for name in self.list_tables().await? {
            match self.describe(&name).await {
                Ok(schema) => tables.push(schema),
                Err(CatalogError::Schema(SchemaSqlError::SchemaNotFound(_))) => {
                    tracing::debug!(target: "schemasql_catalog", table = %name, "skipping table without columns");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(tables)
    }

    /// md5 over the namespace's column and primary-key catalog.
    pub async fn fingerprint(&self) -> CatalogResult<String> {
        let row = self
            .client
            .query_one(FINGERPRINT_SQL, &[&self.namespace])
            .await?;
        get::<String>(&row, "fingerprint")
    }
}

#[async_trait::async_trait]
impl<C: CatalogClient + Send> SchemaProvider for PgCatalogProvider<C> {
    async fn table_schema(&self, table_name: &str) -> SchemaSqlResult<TableSchema> {
        self.describe(table_name)
            .await
            .map_err(|e| e.into_schema_error(table_name))
    }
}
