//! Query seam for catalog introspection.

use crate::error::CatalogResult;
use std::sync::Arc;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Anything that can run read-only catalog queries.
///
/// Implemented for `tokio_postgres::Client`, `tokio_postgres::Transaction`,
/// [`crate::CatalogConnection`], and references or `Arc`s of those.
#[async_trait::async_trait]
pub trait CatalogClient: Sync {
    /// Run a query and return every row.
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CatalogResult<Vec<Row>>;

    /// Run a query that yields exactly one row.
    async fn query_one(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CatalogResult<Row>;
}

// Method calls below resolve to the drivers' inherent methods.

#[async_trait::async_trait]
impl CatalogClient for tokio_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CatalogResult<Vec<Row>> {
        Ok(self.query(sql, params).await?)
    }

    async fn query_one(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CatalogResult<Row> {
        Ok(self.query_one(sql, params).await?)
    }
}

#[async_trait::async_trait]
impl CatalogClient for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CatalogResult<Vec<Row>> {
        Ok(self.query(sql, params).await?)
    }

    async fn query_one(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CatalogResult<Row> {
        Ok(self.query_one(sql, params).await?)
    }
}

#[async_trait::async_trait]
impl<C: CatalogClient + ?Sized> CatalogClient for &C {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CatalogResult<Vec<Row>> {
        (**self).query(sql, params).await
    }

    async fn query_one(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CatalogResult<Row> {
        (**self).query_one(sql, params).await
    }
}

#[async_trait::async_trait]
impl<C: CatalogClient + Send + ?Sized> CatalogClient for Arc<C> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CatalogResult<Vec<Row>> {
        (**self).query(sql, params).await
    }

    async fn query_one(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> CatalogResult<Row> {
        (**self).query_one(sql, params).await
    }
}
