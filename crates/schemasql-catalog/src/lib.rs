//! # schemasql-catalog
//!
//! PostgreSQL-backed [`schemasql::SchemaProvider`] and an on-disk schema
//! snapshot.
//!
//! ```ignore
//! use schemasql::{BuilderConfig, CachedSchemaProvider, StatementBuilder};
//! use schemasql_catalog::{CatalogConfig, CatalogConnection, PgCatalogProvider};
//!
//! let config = CatalogConfig::from_env()?;
//! let conn = CatalogConnection::connect(&config).await?;
//! let provider = CachedSchemaProvider::new(PgCatalogProvider::new(&conn, &config.namespace));
//! let builder = StatementBuilder::new(provider, BuilderConfig::new().target_schema("public"))?;
//! println!("{}", builder.insert_for("orders").await?);
//! ```

pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod introspect;
pub mod snapshot;

pub use client::CatalogClient;
pub use config::{CatalogConfig, DEFAULT_NAMESPACE, SnapshotConfig};
pub use connection::CatalogConnection;
pub use error::{CatalogError, CatalogResult};
pub use introspect::{CatalogColumn, PgCatalogProvider, build_table_schema, sql_name};
pub use snapshot::{SNAPSHOT_VERSION, SchemaSnapshot, SnapshotLoad};
