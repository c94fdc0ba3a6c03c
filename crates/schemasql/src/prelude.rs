//! Convenient imports for typical `schemasql` usage.
//!
//! ```ignore
//! use schemasql::prelude::*;
//! ```

pub use crate::{
    BuilderConfig, Column, Filter, SchemaProvider, SchemaSqlError, SchemaSqlResult, Selector,
    Statement, StatementBuilder, TableSchema, build_insert, build_select, build_select_from,
    build_update,
};
