//! # schemasql
//!
//! Schema-driven SQL generation: describe a table once (from the live catalog
//! or by hand), then generate parameter-safe INSERT / UPDATE / SELECT text for it.
//!
//! ## Features
//!
//! - **Schema-driven**: column lists and order come from a [`TableSchema`], never hand-written
//! - **Values are placeholders**: every value is a positional `?`; each [`Statement`]
//!   lists its binding order
//! - **Validated identifiers**: table, schema, column and alias names must parse as
//!   identifiers before they reach statement text
//! - **Safe defaults**: UPDATE requires a primary key; filters reject unknown operators
//!   and leading conjunctions
//! - **Pluggable metadata**: any [`SchemaProvider`] (in-memory, cached, or the
//!   `schemasql-catalog` PostgreSQL provider)
//!
//! ## Example
//!
//! ```
//! use schemasql::{Column, Filter, Selector, TableSchema, build_insert, build_select_from, build_update};
//!
//! let orders = TableSchema::new("Orders", vec![
//!     Column::new("OrderId", "int identity", 0).primary_key(true),
//!     Column::new("CustomerId", "int", 1),
//!     Column::new("Amount", "decimal", 2),
//! ])?;
//!
//! assert_eq!(
//!     build_insert(&orders, "dbo")?.sql,
//!     "INSERT INTO dbo.Orders(CustomerId, Amount) VALUES (?, ?)"
//! );
//! assert_eq!(
//!     build_update(&orders, "dbo")?.sql,
//!     "UPDATE table SET table.CustomerId=?, table.Amount=? FROM dbo.Orders table WHERE OrderId=?"
//! );
//!
//! let mut columns = Selector::default();
//! columns.column_list(&["OrderId", "Amount"], &[], &[])?;
//! let mut filter = Filter::new();
//! filter.clause("and", "=", ["t.CustomerId"])?;
//!
//! let select = build_select_from("Orders", "dbo", &columns, Some(&filter))?;
//! assert_eq!(
//!     select.sql,
//!     "SELECT t.OrderId, t.Amount FROM dbo.Orders t WHERE ( t.CustomerId = ? )"
//! );
//! # Ok::<(), schemasql::SchemaSqlError>(())
//! ```

pub mod builder;
pub mod column;
pub mod config;
pub mod error;
pub mod filter;
pub mod ident;
pub mod prelude;
pub mod provider;
pub mod selector;
pub mod statement;
pub mod table;

pub use builder::StatementBuilder;
pub use column::{Column, DEFAULT_IDENTITY_MARKER};
pub use config::{BuilderConfig, DEFAULT_SELECT_ALIAS, DEFAULT_TARGET_SCHEMA, DEFAULT_UPDATE_ALIAS};
pub use error::{SchemaSqlError, SchemaSqlResult};
pub use filter::{CompareOp, Filter, Joiner, VALID_JOINERS, VALID_OPERATORS};
pub use ident::{Ident, IdentPart};
pub use provider::{CachedSchemaProvider, SchemaProvider, StaticSchemaProvider};
pub use selector::Selector;
pub use statement::{
    PLACEHOLDER, ParamRole, ParamSlot, Statement, build_insert, build_select, build_select_from,
    build_update, build_update_aliased,
};
pub use table::TableSchema;

// Re-exported for implementors of `SchemaProvider`.
pub use async_trait::async_trait;
