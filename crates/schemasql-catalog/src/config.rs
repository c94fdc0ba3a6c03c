//! Catalog connection and snapshot configuration.

use crate::error::{CatalogError, CatalogResult};
use std::path::PathBuf;

/// Namespace introspected when none is configured.
pub const DEFAULT_NAMESPACE: &str = "public";

/// Environment variable holding the connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable overriding the introspected namespace.
pub const NAMESPACE_ENV: &str = "SCHEMASQL_NAMESPACE";

/// Connection settings for [`crate::CatalogConnection`].
#[derive(Clone)]
pub struct CatalogConfig {
    /// libpq-style connection string or URL.
    pub database_url: String,
    /// PostgreSQL schema whose tables are described.
    pub namespace: String,
}

impl CatalogConfig {
    /// Create a configuration for `database_url` in the default namespace.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    /// Read `DATABASE_URL` and the optional `SCHEMASQL_NAMESPACE`.
    ///
    /// Does not load `.env` files; call `dotenvy::dotenv()` first if wanted.
    pub fn from_env() -> CatalogResult<Self> {
        let database_url = std::env::var(DATABASE_URL_ENV)
            .map_err(|_| CatalogError::Config(format!("{DATABASE_URL_ENV} is not set")))?;
        let mut config = Self::new(database_url);
        if let Ok(namespace) = std::env::var(NAMESPACE_ENV) {
            if !namespace.trim().is_empty() {
                config.namespace = namespace;
            }
        }
        Ok(config)
    }

    /// Set the namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

// Connection strings carry credentials.
impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("database_url", &"<redacted>")
            .field("namespace", &self.namespace)
            .finish()
    }
}

/// Where and for which namespace a [`crate::SchemaSnapshot`] is kept.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Directory to store snapshot files (default: `./.schemasql`).
    pub cache_dir: PathBuf,
    /// Snapshot file name inside `cache_dir` (default: `schema.json`).
    pub file_name: String,
    /// Namespace to introspect (default: `public`).
    pub namespace: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        let cache_dir = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".schemasql");

        Self {
            cache_dir,
            file_name: "schema.json".to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl SnapshotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache directory.
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Set the snapshot file name.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Set the namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Full path of the snapshot file.
    pub fn path(&self) -> PathBuf {
        self.cache_dir.join(&self.file_name)
    }
}
