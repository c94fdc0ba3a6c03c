//! A single catalog connection with an explicit open/close lifecycle.

use crate::client::CatalogClient;
use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use tokio::task::JoinHandle;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls, Row};

/// An open connection to the metadata store.
///
/// The driver future runs on a spawned task; [`close`](Self::close) drops the
/// client and waits for that task to finish.
pub struct CatalogConnection {
    client: Client,
    driver: JoinHandle<()>,
    namespace: String,
}

impl CatalogConnection {
    /// Open a connection using `config`. Must be called within a tokio runtime.
    pub async fn connect(config: &CatalogConfig) -> CatalogResult<Self> {
        let (client, connection) = tokio_postgres::connect(&config.database_url, NoTls).await?;
        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(target: "schemasql_catalog", error = %e, "catalog connection error");
            }
        });
        tracing::debug!(
            target: "schemasql_catalog",
            namespace = %config.namespace,
            "catalog connection opened"
        );
        Ok(Self {
            client,
            driver,
            namespace: config.namespace.clone(),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Namespace this connection was configured for.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Close the connection and wait for the driver task.
    pub async fn close(self) -> CatalogResult<()> {
        let Self { client, driver, .. } = self;
        drop(client);
        driver
            .await
            .map_err(|e| CatalogError::Connection(e.to_string()))?;
        tracing::debug!(target: "schemasql_catalog", "catalog connection closed");
        Ok(())
    }
}

#[async_trait::async_trait]
impl CatalogClient for CatalogConnection {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CatalogResult<Vec<Row>> {
        CatalogClient::query(&self.client, sql, params).await
    }

    async fn query_one(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CatalogResult<Row> {
        CatalogClient::query_one(&self.client, sql, params).await
    }
}
