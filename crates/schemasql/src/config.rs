//! Statement builder configuration.

use crate::error::SchemaSqlResult;
use crate::ident::Ident;

/// Namespace prefix used when none is configured.
pub const DEFAULT_TARGET_SCHEMA: &str = "dbo";
/// Table alias used by generated UPDATE statements.
pub const DEFAULT_UPDATE_ALIAS: &str = "table";
/// Table alias used by generated SELECT statements and [`crate::Selector`].
pub const DEFAULT_SELECT_ALIAS: &str = "t";

/// Configuration for [`crate::StatementBuilder`].
///
/// All names are used verbatim as SQL identifiers, so they must be static,
/// trusted values. [`BuilderConfig::validate`] checks them before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Schema/namespace prefix for generated statements.
    pub target_schema: String,
    /// Alias for the target table in UPDATE ... FROM statements.
    pub update_alias: String,
    /// Alias for the target table in SELECT statements.
    pub select_alias: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            target_schema: DEFAULT_TARGET_SCHEMA.to_string(),
            update_alias: DEFAULT_UPDATE_ALIAS.to_string(),
            select_alias: DEFAULT_SELECT_ALIAS.to_string(),
        }
    }
}

impl BuilderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target schema.
    pub fn target_schema(mut self, schema: impl Into<String>) -> Self {
        self.target_schema = schema.into();
        self
    }

    /// Set the UPDATE alias.
    pub fn update_alias(mut self, alias: impl Into<String>) -> Self {
        self.update_alias = alias.into();
        self
    }

    /// Set the SELECT alias.
    pub fn select_alias(mut self, alias: impl Into<String>) -> Self {
        self.select_alias = alias.into();
        self
    }

    /// Check that every configured name is a valid identifier.
    pub fn validate(&self) -> SchemaSqlResult<()> {
        Ident::parse(&self.target_schema)?;
        Ident::parse(&self.update_alias)?;
        Ident::parse(&self.select_alias)?;
        Ok(())
    }
}
