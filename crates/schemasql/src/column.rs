//! Column descriptors.

use serde::{Deserialize, Serialize};

/// Type-name marker drivers report for identity (auto-increment) columns,
/// e.g. `int identity`.
pub const DEFAULT_IDENTITY_MARKER: &str = "identity";

/// Immutable descriptor of one table column.
///
/// # Example
///
/// ```
/// use schemasql::Column;
///
/// let id = Column::new("OrderId", "int identity", 0).primary_key(true);
/// assert!(id.is_identity());
/// assert!(id.is_primary_key());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    type_name: String,
    ordinal_position: u32,
    #[serde(default)]
    is_nullable: bool,
    #[serde(default)]
    is_primary_key: bool,
}

impl Column {
    /// Create a non-null, non-key column at the given 0-based ordinal position.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, ordinal_position: u32) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ordinal_position,
            is_nullable: false,
            is_primary_key: false,
        }
    }

    pub fn nullable(mut self, is_nullable: bool) -> Self {
        self.is_nullable = is_nullable;
        self
    }

    pub fn primary_key(mut self, is_primary_key: bool) -> Self {
        self.is_primary_key = is_primary_key;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Database-reported type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn ordinal_position(&self) -> u32 {
        self.ordinal_position
    }

    pub fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    pub fn is_primary_key(&self) -> bool {
        self.is_primary_key
    }

    /// Whether the database generates this column's value on insert,
    /// using [`DEFAULT_IDENTITY_MARKER`].
    pub fn is_identity(&self) -> bool {
        self.is_identity_with(DEFAULT_IDENTITY_MARKER)
    }

    /// Whether the type name contains `marker` (ASCII case-insensitive).
    pub fn is_identity_with(&self, marker: &str) -> bool {
        if marker.is_empty() {
            return false;
        }
        self.type_name
            .to_ascii_lowercase()
            .contains(&marker.to_ascii_lowercase())
    }
}
