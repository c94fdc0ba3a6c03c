//! Provider-backed statement generation.

use crate::config::BuilderConfig;
use crate::error::{SchemaSqlError, SchemaSqlResult};
use crate::filter::Filter;
use crate::provider::SchemaProvider;
use crate::selector::Selector;
use crate::statement::{self, Statement};
use crate::table::TableSchema;

/// Resolves table names through a [`SchemaProvider`] and generates statements
/// using the configured target schema and aliases.
///
/// # Example
///
/// ```ignore
/// use schemasql::{BuilderConfig, StatementBuilder};
///
/// let builder = StatementBuilder::new(provider, BuilderConfig::new().target_schema("sales"))?;
/// let stmt = builder.insert_for("Orders").await?;
/// assert_eq!(stmt.sql, "INSERT INTO sales.Orders(CustomerId, Amount) VALUES (?, ?)");
/// ```
pub struct StatementBuilder<P> {
    provider: P,
    config: BuilderConfig,
}

impl<P: SchemaProvider> StatementBuilder<P> {
    /// Create a builder, validating the configured identifiers up front.
    pub fn new(provider: P, config: BuilderConfig) -> SchemaSqlResult<Self> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// INSERT for an already-resolved schema.
    pub fn insert(&self, schema: &TableSchema) -> SchemaSqlResult<Statement> {
        statement::build_insert(schema, &self.config.target_schema)
    }

    /// UPDATE for an already-resolved schema.
    pub fn update(&self, schema: &TableSchema) -> SchemaSqlResult<Statement> {
        statement::build_update_aliased(
            schema,
            &self.config.target_schema,
            &self.config.update_alias,
        )
    }

    /// Look up `table_name` and build its INSERT.
    pub async fn insert_for(&self, table_name: &str) -> SchemaSqlResult<Statement> {
        let schema = self.provider.table_schema(table_name).await?;
        self.insert(&schema)
    }

    /// Look up `table_name` and build its UPDATE.
    pub async fn update_for(&self, table_name: &str) -> SchemaSqlResult<Statement> {
        let schema = self.provider.table_schema(table_name).await?;
        self.update(&schema)
    }

    /// Build a SELECT over `table_name` after confirming the table exists.
    ///
    /// The table is aliased with the configured select alias. A selector that
    /// prefixes columns with a different alias is rejected with
    /// [`SchemaSqlError::AliasMismatch`].
    pub async fn select_for(
        &self,
        table_name: &str,
        selector: &Selector,
        filter: Option<&Filter>,
    ) -> SchemaSqlResult<Statement> {
        let alias = &self.config.select_alias;
        if let Some(used) = selector.alias() {
            if used != alias.as_str() {
                return Err(SchemaSqlError::AliasMismatch {
                    configured: alias.clone(),
                    selector: used.to_string(),
                });
            }
        }
        let schema = self.provider.table_schema(table_name).await?;
        statement::select_statement(
            schema.table_name(),
            &self.config.target_schema,
            alias,
            selector,
            filter,
        )
    }
}
