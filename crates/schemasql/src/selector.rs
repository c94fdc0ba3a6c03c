//! SELECT column-list builder.

use crate::config::DEFAULT_SELECT_ALIAS;
use crate::error::{SchemaSqlError, SchemaSqlResult};
use crate::ident::checked_part;
use std::fmt;

/// Accumulating SELECT column list.
///
/// Column and alias names are validated identifiers. Terms added by
/// [`Selector::calc`] are raw SQL and must only come from trusted code.
///
/// # Example
///
/// ```
/// use schemasql::Selector;
///
/// let mut s = Selector::new("t", true)?;
/// s.column_list(&["a", "b"], &["a"], &[("c", "total")])?
///     .calc("t.price", " * 1.2")?;
/// assert_eq!(s.to_string(), "DISTINCT t.a, t.b, t.c AS total, t.price * 1.2");
/// # Ok::<(), schemasql::SchemaSqlError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    table_alias: String,
    use_alias: bool,
    stmt: String,
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            table_alias: DEFAULT_SELECT_ALIAS.to_string(),
            use_alias: true,
            stmt: String::new(),
        }
    }
}

impl Selector {
    /// Create a selector that prefixes columns with `alias.` when `use_alias`
    /// is set.
    pub fn new(alias: &str, use_alias: bool) -> SchemaSqlResult<Self> {
        Ok(Self {
            table_alias: checked_part(alias)?,
            use_alias,
            stmt: String::new(),
        })
    }

    /// The alias used as column prefix, if aliasing is enabled.
    pub fn alias(&self) -> Option<&str> {
        self.use_alias.then_some(self.table_alias.as_str())
    }

    fn qualify(&self, column: &str) -> SchemaSqlResult<String> {
        let column = checked_part(column)?;
        Ok(if self.use_alias {
            format!("{}.{column}", self.table_alias)
        } else {
            column
        })
    }

    /// Append columns to the list.
    ///
    /// `plain` columns are selected as-is, `aliased` pairs as `col AS alias`.
    /// Any column also named in `distinct` gets a `DISTINCT` prefix.
    pub fn column_list(
        &mut self,
        plain: &[&str],
        distinct: &[&str],
        aliased: &[(&str, &str)],
    ) -> SchemaSqlResult<&mut Self> {
        let prefix = |col: &str| {
            if distinct.iter().any(|d| *d == col) {
                "DISTINCT "
            } else {
                ""
            }
        };

        let mut terms = Vec::with_capacity(plain.len() + aliased.len());
        for &col in plain {
            terms.push(format!("{}{}", prefix(col), self.qualify(col)?));
        }
        for &(col, alias) in aliased {
            terms.push(format!(
                "{}{} AS {}",
                prefix(col),
                self.qualify(col)?,
                checked_part(alias)?
            ));
        }

        if !terms.is_empty() {
            self.push_term(&terms.join(", "));
        }
        Ok(self)
    }

    /// Append a calculated term `<field><op>`, e.g. `calc("t.qty", " * 40")`.
    pub fn calc(&mut self, field: &str, op: &str) -> SchemaSqlResult<&mut Self> {
        let term = format!("{field}{op}");
        if term.trim().is_empty() {
            return Err(SchemaSqlError::EmptyExpression);
        }
        self.push_term(&term);
        Ok(self)
    }

    fn push_term(&mut self, term: &str) {
        if !self.stmt.is_empty() {
            self.stmt.push_str(", ");
        }
        self.stmt.push_str(term);
    }

    /// The accumulated column list, verbatim.
    pub fn as_str(&self) -> &str {
        &self.stmt
    }

    pub fn is_empty(&self) -> bool {
        self.stmt.is_empty()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stmt)
    }
}
