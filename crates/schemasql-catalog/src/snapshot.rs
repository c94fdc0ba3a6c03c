//! On-disk JSON snapshot of a namespace's table schemas.
//!
//! The snapshot is reused while the live catalog fingerprint matches, so
//! repeated runs avoid per-table metadata queries.

use crate::client::CatalogClient;
use crate::config::SnapshotConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::introspect::PgCatalogProvider;
use chrono::{DateTime, Utc};
use schemasql::{StaticSchemaProvider, TableSchema};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotLoad {
    /// Loaded from the file (fingerprint unchanged).
    CacheHit,
    /// Loaded from the catalog (file missing/invalid or fingerprint changed).
    Refreshed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    pub version: u32,
    pub retrieved_at: DateTime<Utc>,
    pub namespace: String,
    pub fingerprint: String,
    pub tables: Vec<TableSchema>,
}

impl SchemaSnapshot {
    pub fn new(namespace: impl Into<String>, fingerprint: impl Into<String>, tables: Vec<TableSchema>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            retrieved_at: Utc::now(),
            namespace: namespace.into(),
            fingerprint: fingerprint.into(),
            tables,
        }
    }

    /// Reuse the snapshot file if it is current, otherwise rebuild it from the
    /// catalog and rewrite the file.
    pub async fn load_or_refresh<C: CatalogClient>(
        client: &C,
        config: &SnapshotConfig,
    ) -> CatalogResult<(Self, SnapshotLoad)> {
        let provider = PgCatalogProvider::new(client, config.namespace.clone());
        Self::load_or_refresh_from(&provider, config).await
    }

    async fn load_or_refresh_from<S: CatalogSource>(
        source: &S,
        config: &SnapshotConfig,
    ) -> CatalogResult<(Self, SnapshotLoad)> {
        let path = config.path();

        let cached = match Self::read(&path) {
            Ok(cached) => cached,
            Err(e) => {
                tracing::warn!(
                    target: "schemasql_catalog",
                    path = %path.display(),
                    error = %e,
                    "ignoring unreadable schema snapshot"
                );
                None
            }
        };

        let mut live_fingerprint = None;
        if let Some(cached) = cached {
            if cached.version == SNAPSHOT_VERSION && cached.namespace == config.namespace {
                let current = source.fingerprint().await?;
                if current == cached.fingerprint {
                    tracing::debug!(
                        target: "schemasql_catalog",
                        path = %path.display(),
                        tables = cached.tables.len(),
                        "schema snapshot is current"
                    );
                    return Ok((cached, SnapshotLoad::CacheHit));
                }
                live_fingerprint = Some(current);
            }
        }

        let fingerprint = match live_fingerprint {
            Some(fingerprint) => fingerprint,
            None => source.fingerprint().await?,
        };
        let tables = source.load_all().await?;
        let refreshed = Self::new(config.namespace.clone(), fingerprint, tables);
        refreshed.write(&path)?;

        tracing::info!(
            target: "schemasql_catalog",
            path = %path.display(),
            tables = refreshed.tables.len(),
            "schema snapshot refreshed"
        );
        Ok((refreshed, SnapshotLoad::Refreshed))
    }

    /// Read a snapshot file; `Ok(None)` when it does not exist.
    pub fn read(path: &Path) -> CatalogResult<Option<Self>> {
        let data = match std::fs::read(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CatalogError::Snapshot(e.to_string())),
        };

        serde_json::from_slice::<Self>(&data)
            .map(Some)
            .map_err(|e| CatalogError::Serialization(format!("Failed to parse schema snapshot: {e}")))
    }

    /// Write the snapshot as pretty JSON via a temp file and rename.
    pub fn write(&self, path: &Path) -> CatalogResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::Snapshot(e.to_string()))?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(self).map_err(|e| {
            CatalogError::Serialization(format!("Failed to serialize schema snapshot: {e}"))
        })?;

        std::fs::write(&tmp_path, data).map_err(|e| CatalogError::Snapshot(e.to_string()))?;
        std::fs::rename(&tmp_path, path).map_err(|e| CatalogError::Snapshot(e.to_string()))?;
        Ok(())
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.table_name() == name)
    }

    /// Serve the snapshot's tables through a [`StaticSchemaProvider`].
    pub fn into_provider(self) -> StaticSchemaProvider {
        self.tables.into_iter().collect()
    }
}

/// What a snapshot refresh needs from the catalog.
#[async_trait::async_trait]
trait CatalogSource: Sync {
    async fn fingerprint(&self) -> CatalogResult<String>;
    async fn load_all(&self) -> CatalogResult<Vec<TableSchema>>;
}

#[async_trait::async_trait]
impl<C: CatalogClient + Send> CatalogSource for PgCatalogProvider<C> {
    async fn fingerprint(&self) -> CatalogResult<String> {
        PgCatalogProvider::fingerprint(self).await
    }

    async fn load_all(&self) -> CatalogResult<Vec<TableSchema>> {
        PgCatalogProvider::load_all(self).await
    }
}
