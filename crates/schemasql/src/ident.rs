//! SQL identifier validation.
//!
//! Table, schema and column names are spliced into statement text, so they are
//! parsed into an [`Ident`] before any text is emitted.
//!
//! A bare part is a letter or `_` followed by letters, digits, `_` or `$`.
//! A double-quoted part may hold anything but NUL, with `""` for a literal quote.
//!
//! # Example
//! ```
//! use schemasql::Ident;
//!
//! let t = Ident::parse("dbo.Orders")?;
//! assert_eq!(t.to_sql(), "dbo.Orders");
//! assert!(Ident::parse("Orders; DROP TABLE x").is_err());
//! # Ok::<(), schemasql::SchemaSqlError>(())
//! ```

use crate::error::{SchemaSqlError, SchemaSqlResult};
use std::fmt;

/// One dot-separated part of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    /// Bare name, `[A-Za-z_][A-Za-z0-9_$]*`.
    Unquoted(String),
    /// Double-quoted name, stored unescaped.
    Quoted(String),
}

/// A validated table, schema, column or alias name.
///
/// Dotted (`dbo.Orders`) and quoted (`"Order Lines"`) forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub parts: Vec<IdentPart>,
}

impl Ident {
    pub fn parse(s: &str) -> SchemaSqlResult<Self> {
        if s.is_empty() {
            return Err(SchemaSqlError::invalid_identifier(
                "identifier cannot be empty",
            ));
        }
        if s.contains('\0') {
            return Err(SchemaSqlError::invalid_identifier(
                "identifier cannot contain NUL character",
            ));
        }

        let mut parts = Vec::new();
        let mut rest = s;
        loop {
            let (part, tail) = match rest.strip_prefix('"') {
                Some(quoted) => split_quoted(quoted, s)?,
                None => split_unquoted(rest, s)?,
            };
            parts.push(part);

            match tail.strip_prefix('.') {
                Some("") => {
                    return Err(SchemaSqlError::invalid_identifier(format!(
                        "trailing '.' in '{s}'"
                    )));
                }
                Some(next) => rest = next,
                None if tail.is_empty() => break,
                None => {
                    return Err(SchemaSqlError::invalid_identifier(format!(
                        "expected '.' after {} in '{s}'",
                        parts.len()
                    )));
                }
            }
        }

        Ok(Self { parts })
    }

    /// SQL text for the identifier; quoted parts are re-escaped.
    pub fn to_sql(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match part {
                IdentPart::Unquoted(name) => f.write_str(name)?,
                IdentPart::Quoted(name) => write!(f, "\"{}\"", name.replace('"', "\"\""))?,
            }
        }
        Ok(())
    }
}

// `s` starts just after the opening quote.
fn split_quoted<'a>(s: &'a str, whole: &str) -> SchemaSqlResult<(IdentPart, &'a str)> {
    let mut name = String::new();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '"' {
            name.push(c);
            continue;
        }
        if s[i + 1..].starts_with('"') {
            chars.next();
            name.push('"');
            continue;
        }
        if name.is_empty() {
            return Err(SchemaSqlError::invalid_identifier(format!(
                "empty quoted identifier in '{whole}'"
            )));
        }
        return Ok((IdentPart::Quoted(name), &s[i + 1..]));
    }
    Err(SchemaSqlError::invalid_identifier(format!(
        "unclosed quoted identifier in '{whole}'"
    )))
}

fn split_unquoted<'a>(s: &'a str, whole: &str) -> SchemaSqlResult<(IdentPart, &'a str)> {
    let (name, tail) = s.split_at(s.find('.').unwrap_or(s.len()));
    let mut chars = name.chars();
    match chars.next() {
        None => {
            return Err(SchemaSqlError::invalid_identifier(format!(
                "empty segment in '{whole}'"
            )));
        }
        Some(c) if c != '_' && !c.is_ascii_alphabetic() => {
            return Err(SchemaSqlError::invalid_identifier(format!(
                "'{whole}' cannot start with '{c}'"
            )));
        }
        Some(_) => {}
    }
    if let Some(c) = chars.find(|&c| c != '_' && c != '$' && !c.is_ascii_alphanumeric()) {
        return Err(SchemaSqlError::invalid_identifier(format!(
            "invalid character '{c}' in '{whole}'"
        )));
    }
    Ok((IdentPart::Unquoted(name.to_string()), tail))
}

/// Validate `name` and return its canonical SQL rendering.
pub(crate) fn checked(name: &str) -> SchemaSqlResult<String> {
    Ident::parse(name).map(|ident| ident.to_sql())
}

/// Like [`checked`], but `name` must be a single part (a column or alias,
/// never `schema.table`).
pub(crate) fn checked_part(name: &str) -> SchemaSqlResult<String> {
    let ident = Ident::parse(name)?;
    if ident.parts.len() != 1 {
        return Err(SchemaSqlError::invalid_identifier(format!(
            "'{name}' must be a single name, not a dotted path"
        )));
    }
    Ok(ident.to_sql())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_dotted_names_render_unchanged() {
        for name in ["Orders", "dbo.Orders", "col$1", "_tmp.x_2"] {
            assert_eq!(checked(name).unwrap(), name);
        }
    }

    #[test]
    fn quoted_part_unescapes_and_reescapes() {
        let ident = Ident::parse(r#""Order ""Lines""""#).unwrap();
        assert_eq!(ident.parts, vec![IdentPart::Quoted(r#"Order "Lines""#.into())]);
        assert_eq!(ident.to_sql(), r#""Order ""Lines""""#);
    }

    #[test]
    fn quoted_and_bare_parts_mix() {
        let ident = Ident::parse(r#"dbo."Order Lines".id"#).unwrap();
        assert_eq!(
            ident.parts,
            vec![
                IdentPart::Unquoted("dbo".into()),
                IdentPart::Quoted("Order Lines".into()),
                IdentPart::Unquoted("id".into()),
            ]
        );
        assert_eq!(ident.to_string(), r#"dbo."Order Lines".id"#);
    }

    #[test]
    fn single_part_names() {
        assert_eq!(checked_part("Amount").unwrap(), "Amount");
        assert_eq!(checked_part(r#""unit price""#).unwrap(), r#""unit price""#);
        assert!(matches!(
            checked_part("t.Amount"),
            Err(SchemaSqlError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn statement_fragments_are_not_names() {
        let err = Ident::parse("Orders; DROP TABLE Orders").unwrap_err();
        assert!(matches!(err, SchemaSqlError::InvalidIdentifier(_)));
    }

    #[test]
    fn malformed_names_are_rejected() {
        for bad in [
            "", "1table", "my table", "a..b", "a.", ".a", r#""open"#, r#""""#, r#""a"b"#, "a\0b",
        ] {
            assert!(Ident::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
