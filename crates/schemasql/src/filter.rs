//! WHERE-clause builder.
//!
//! A [`Filter`] accumulates parenthesised clauses. Each clause compares one or
//! more columns against `?` placeholders with a single operator, joined by a
//! single joiner. Clauses are chained with [`Filter::and_`] / [`Filter::or_`].
//!
//! ```
//! use schemasql::Filter;
//!
//! let mut f = Filter::new();
//! f.clause("and", "=", ["a", "b"])?
//!     .or_("or", ">=", ["c"])?;
//! assert_eq!(f.to_string(), "( a = ? AND b = ? ) OR ( c >= ? )");
//! assert_eq!(f.params().len(), 3);
//! # Ok::<(), schemasql::SchemaSqlError>(())
//! ```

use crate::error::{SchemaSqlError, SchemaSqlResult};
use crate::ident::checked;
use crate::statement::{PLACEHOLDER, ParamRole, ParamSlot};
use std::fmt;
use std::str::FromStr;

/// Accepted joiners (case-insensitive).
pub const VALID_JOINERS: [&str; 2] = ["and", "or"];

/// Accepted comparison operators (case-insensitive).
pub const VALID_OPERATORS: [&str; 8] = ["=", ">", "<", ">=", "<=", "in", "like", "between"];

/// Boolean conjunction between comparisons or clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joiner {
    And,
    Or,
}

impl Joiner {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Joiner::And => "AND",
            Joiner::Or => "OR",
        }
    }
}

impl FromStr for Joiner {
    type Err = SchemaSqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "and" => Ok(Joiner::And),
            "or" => Ok(Joiner::Or),
            _ => Err(SchemaSqlError::InvalidJoiner(s.to_string())),
        }
    }
}

impl fmt::Display for Joiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Comparison operator of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Gt,
    Lt,
    Gte,
    Lte,
    In,
    Like,
    Between,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Gte => ">=",
            CompareOp::Lte => "<=",
            CompareOp::In => "IN",
            CompareOp::Like => "LIKE",
            CompareOp::Between => "BETWEEN",
        }
    }

    /// Render ` <col> <op> <placeholder(s)> ` and record the slots it binds.
    fn render(&self, column: &str, params: &mut Vec<ParamSlot>) -> String {
        match self {
            CompareOp::Between => {
                params.push(ParamSlot::new(column, ParamRole::RangeStart));
                params.push(ParamSlot::new(column, ParamRole::RangeEnd));
                format!(" {column} BETWEEN {PLACEHOLDER} AND {PLACEHOLDER} ")
            }
            CompareOp::In => {
                params.push(ParamSlot::new(column, ParamRole::Comparison));
                format!(" {column} IN ({PLACEHOLDER}) ")
            }
            op => {
                params.push(ParamSlot::new(column, ParamRole::Comparison));
                format!(" {column} {} {PLACEHOLDER} ", op.as_sql())
            }
        }
    }
}

impl FromStr for CompareOp {
    type Err = SchemaSqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "=" => Ok(CompareOp::Eq),
            ">" => Ok(CompareOp::Gt),
            "<" => Ok(CompareOp::Lt),
            ">=" => Ok(CompareOp::Gte),
            "<=" => Ok(CompareOp::Lte),
            "in" => Ok(CompareOp::In),
            "like" => Ok(CompareOp::Like),
            "between" => Ok(CompareOp::Between),
            _ => Err(SchemaSqlError::InvalidOperator(s.to_string())),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Accumulating WHERE fragment.
///
/// Every method validates its input before touching the accumulated text, so
/// a failed call leaves the filter unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    stmt: String,
    params: Vec<ParamSlot>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `( <col> <OP> ? <JOINER> ... )`, one comparison per column in
    /// the given order.
    ///
    /// `joiner` must be one of [`VALID_JOINERS`] and `operator` one of
    /// [`VALID_OPERATORS`], compared case-insensitively.
    pub fn clause<I, S>(&mut self, joiner: &str, operator: &str, columns: I) -> SchemaSqlResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (text, params) = Self::render_clause(joiner, operator, columns)?;
        self.stmt.push_str(&text);
        self.params.extend(params);
        Ok(self)
    }

    /// Append ` AND ` followed by a new clause.
    ///
    /// The `joiner` argument still controls how the new clause's own
    /// comparisons are combined.
    pub fn and_<I, S>(&mut self, joiner: &str, operator: &str, columns: I) -> SchemaSqlResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.conjoin(Joiner::And, joiner, operator, columns)
    }

    /// Append ` OR ` followed by a new clause.
    pub fn or_<I, S>(&mut self, joiner: &str, operator: &str, columns: I) -> SchemaSqlResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.conjoin(Joiner::Or, joiner, operator, columns)
    }

    fn conjoin<I, S>(
        &mut self,
        conjunction: Joiner,
        joiner: &str,
        operator: &str,
        columns: I,
    ) -> SchemaSqlResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.stmt.is_empty() {
            return Err(SchemaSqlError::EmptyFilterConjunction(conjunction.as_sql()));
        }
        let (text, params) = Self::render_clause(joiner, operator, columns)?;
        self.stmt.push(' ');
        self.stmt.push_str(conjunction.as_sql());
        self.stmt.push(' ');
        self.stmt.push_str(&text);
        self.params.extend(params);
        Ok(self)
    }

    fn render_clause<I, S>(
        joiner: &str,
        operator: &str,
        columns: I,
    ) -> SchemaSqlResult<(String, Vec<ParamSlot>)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joiner: Joiner = joiner.parse()?;
        let op: CompareOp = operator.parse()?;

        let columns = columns
            .into_iter()
            .map(|c| checked(c.as_ref()))
            .collect::<SchemaSqlResult<Vec<_>>>()?;
        if columns.is_empty() {
            return Err(SchemaSqlError::EmptyColumnList);
        }

        let mut params = Vec::with_capacity(columns.len());
        let body = columns
            .iter()
            .map(|c| op.render(c, &mut params))
            .collect::<Vec<_>>()
            .join(joiner.as_sql());
        Ok((format!("({body})"), params))
    }

    /// The accumulated fragment, verbatim.
    pub fn as_str(&self) -> &str {
        &self.stmt
    }

    /// Parameter slots in placeholder order.
    pub fn params(&self) -> &[ParamSlot] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.stmt.is_empty()
    }

    /// Reset to the empty state.
    pub fn clear(&mut self) -> &mut Self {
        self.stmt.clear();
        self.params.clear();
        self
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stmt)
    }
}
