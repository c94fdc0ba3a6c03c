//! Error types for schemasql-catalog

use schemasql::SchemaSqlError;
use thiserror::Error;

/// Result type for schemasql-catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error type for catalog access and schema snapshots.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Database error from tokio-postgres.
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),
    /// Connection lifecycle error (driver task failed or panicked).
    #[error("Connection error: {0}")]
    Connection(String),
    /// Decode error when reading a catalog column.
    #[error("Decode error for column '{column}': {message}")]
    Decode { column: String, message: String },
    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Snapshot file could not be read or written.
    #[error("Snapshot error: {0}")]
    Snapshot(String),
    /// Snapshot (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Catalog metadata did not form a valid table schema.
    #[error(transparent)]
    Schema(#[from] SchemaSqlError),
}

impl CatalogError {
    /// Create a decode error.
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Convert into the core error type at the `SchemaProvider` seam.
    ///
    /// Schema errors pass through unchanged; everything else is a failed
    /// metadata query for `table`.
    pub fn into_schema_error(self, table: &str) -> SchemaSqlError {
        match self {
            CatalogError::Schema(e) => e,
            other => SchemaSqlError::metadata_query(table, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_errors_pass_through() {
        let err = CatalogError::Schema(SchemaSqlError::schema_not_found("users"));
        assert_eq!(
            err.into_schema_error("users"),
            SchemaSqlError::SchemaNotFound("users".into())
        );
    }

    #[test]
    fn other_errors_become_metadata_query_failures() {
        let err = CatalogError::decode("attnum", "unexpected type").into_schema_error("users");
        assert!(err.is_metadata_query());
        assert!(err.to_string().contains("attnum"));
    }
}
