//! Error types for schemasql

use thiserror::Error;

/// Result type alias for schemasql operations
pub type SchemaSqlResult<T> = Result<T, SchemaSqlError>;

/// Error types for schema lookup and statement construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaSqlError {
    /// Table does not exist, or the catalog reported no columns for it
    #[error("Schema not found for table '{0}'")]
    SchemaNotFound(String),

    /// The metadata query itself failed (connectivity, permissions, decoding)
    #[error("Metadata query failed for table '{table}': {message}")]
    MetadataQuery { table: String, message: String },

    /// Every column of the table is auto-generated
    #[error("Table '{0}' has no insertable columns")]
    NoInsertableColumns(String),

    /// UPDATE needs a primary key to derive its WHERE clause
    #[error("Table '{0}' has no primary key columns")]
    NoKeyColumns(String),

    /// Every column is part of the primary key, so there is nothing to SET
    #[error("Table '{0}' has no updatable (non-key) columns")]
    NoUpdatableColumns(String),

    /// Joiner outside the whitelist
    #[error("Invalid joiner '{0}': expected one of [and, or]")]
    InvalidJoiner(String),

    /// Comparison operator outside the whitelist
    #[error("Invalid operator '{0}': expected one of [=, >, <, >=, <=, in, like, between]")]
    InvalidOperator(String),

    /// `and_`/`or_` called before any clause exists
    #[error("Cannot start a filter with '{0}': add a clause first")]
    EmptyFilterConjunction(&'static str),

    /// A filter clause was given no columns
    #[error("Filter clause requires at least one column")]
    EmptyColumnList,

    /// SELECT was assembled without a column list
    #[error("SELECT requires a non-empty column list")]
    EmptySelectList,

    /// A calculated selector term was blank
    #[error("Calculated expression cannot be empty")]
    EmptyExpression,

    /// Selector columns are prefixed with a different alias than the FROM clause uses
    #[error("Selector alias '{selector}' does not match the configured select alias '{configured}'")]
    AliasMismatch { configured: String, selector: String },

    /// Identifier failed validation
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Table metadata violates a TableSchema invariant
    #[error("Invalid table schema: {0}")]
    InvalidSchema(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SchemaSqlError {
    /// Create a metadata query error for a specific table
    pub fn metadata_query(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MetadataQuery {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a schema-not-found error
    pub fn schema_not_found(table: impl Into<String>) -> Self {
        Self::SchemaNotFound(table.into())
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier(message.into())
    }

    /// Create an invalid schema error
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Self::InvalidSchema(message.into())
    }

    /// Check if this error came from a schema lookup that found nothing
    pub fn is_schema_not_found(&self) -> bool {
        matches!(self, Self::SchemaNotFound(_))
    }

    /// Check if this error came from the metadata collaborator itself
    pub fn is_metadata_query(&self) -> bool {
        matches!(self, Self::MetadataQuery { .. })
    }

    /// Check if this is a caller input error (filter/selector/identifier validation)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidJoiner(_)
                | Self::InvalidOperator(_)
                | Self::EmptyFilterConjunction(_)
                | Self::EmptyColumnList
                | Self::EmptySelectList
                | Self::EmptyExpression
                | Self::AliasMismatch { .. }
                | Self::InvalidIdentifier(_)
        )
    }
}
