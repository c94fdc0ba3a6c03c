//! Table metadata lookup.
//!
//! [`SchemaProvider`] is the seam between statement generation and whatever
//! knows the live catalog. The core never opens a connection itself.

use crate::error::{SchemaSqlError, SchemaSqlResult};
use crate::table::TableSchema;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A source of [`TableSchema`]s.
///
/// Implementations return [`SchemaSqlError::SchemaNotFound`] when the table is
/// unknown (or has no columns) and [`SchemaSqlError::MetadataQuery`] when the
/// lookup itself fails. Lookups are read-only.
#[async_trait::async_trait]
pub trait SchemaProvider: Send + Sync {
    /// Describe `table_name`.
    async fn table_schema(&self, table_name: &str) -> SchemaSqlResult<TableSchema>;
}

#[async_trait::async_trait]
impl<P: SchemaProvider + ?Sized> SchemaProvider for Arc<P> {
    async fn table_schema(&self, table_name: &str) -> SchemaSqlResult<TableSchema> {
        (**self).table_schema(table_name).await
    }
}

/// In-memory registry of table schemas.
///
/// Useful for tests, hand-declared schemas, and schemas restored from a
/// snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaProvider {
    tables: HashMap<String, TableSchema>,
}

impl StaticSchemaProvider {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, replacing any previous entry with the same name.
    pub fn register(&mut self, schema: TableSchema) {
        self.tables.insert(schema.table_name().to_string(), schema);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_table(mut self, schema: TableSchema) -> Self {
        self.register(schema);
        self
    }

    pub fn get(&self, table_name: &str) -> Option<&TableSchema> {
        self.tables.get(table_name)
    }

    /// Registered tables, in no particular order.
    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<TableSchema> for StaticSchemaProvider {
    fn from_iter<I: IntoIterator<Item = TableSchema>>(iter: I) -> Self {
        let mut provider = Self::new();
        for schema in iter {
            provider.register(schema);
        }
        provider
    }
}

#[async_trait::async_trait]
impl SchemaProvider for StaticSchemaProvider {
    async fn table_schema(&self, table_name: &str) -> SchemaSqlResult<TableSchema> {
        self.get(table_name)
            .cloned()
            .ok_or_else(|| SchemaSqlError::schema_not_found(table_name))
    }
}

/// Memoizes another provider's answers for the lifetime of the process.
///
/// Schemas are assumed stable during a run. Failed lookups are not cached.
pub struct CachedSchemaProvider<P> {
    inner: P,
    cache: RwLock<HashMap<String, Arc<TableSchema>>>,
}

impl<P: SchemaProvider> CachedSchemaProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Shared schema for `table_name`, querying the inner provider on a miss.
    pub async fn get(&self, table_name: &str) -> SchemaSqlResult<Arc<TableSchema>> {
        let hit = self
            .cache
            .read()
            .map_err(|_| poisoned())?
            .get(table_name)
            .cloned();
        if let Some(schema) = hit {
            tracing::trace!(target: "schemasql.provider", table = table_name, "schema cache hit");
            return Ok(schema);
        }

        tracing::debug!(target: "schemasql.provider", table = table_name, "schema cache miss");
        let schema = Arc::new(self.inner.table_schema(table_name).await?);

        let mut cache = self.cache.write().map_err(|_| poisoned())?;
        Ok(cache
            .entry(table_name.to_string())
            .or_insert(schema)
            .clone())
    }

    /// Drop one cached entry so the next lookup hits the inner provider.
    pub fn invalidate(&self, table_name: &str) -> SchemaSqlResult<()> {
        self.cache
            .write()
            .map_err(|_| poisoned())?
            .remove(table_name);
        Ok(())
    }

    /// Drop every cached entry.
    pub fn clear(&self) -> SchemaSqlResult<()> {
        self.cache.write().map_err(|_| poisoned())?.clear();
        Ok(())
    }

    /// Number of cached tables.
    pub fn cached_len(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

fn poisoned() -> SchemaSqlError {
    SchemaSqlError::Other("schema cache lock poisoned".to_string())
}

#[async_trait::async_trait]
impl<P: SchemaProvider> SchemaProvider for CachedSchemaProvider<P> {
    async fn table_schema(&self, table_name: &str) -> SchemaSqlResult<TableSchema> {
        self.get(table_name).await.map(|s| (*s).clone())
    }
}
