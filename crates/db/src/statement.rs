//! Parameterized SQL statements.
//!
//! A [`Statement`] is SQL text with positional `?` placeholders plus the
//! ordered values bound to them.  Values are always text; the driver does any
//! coercion the column type requires.

use std::fmt;

use crate::DbError;

/// SQL flavour a provider speaks.
///
/// Only the id-to-text cast used by the insert statements differs; bracketed
/// identifiers and `?` placeholders are understood by both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Fabric SQL Database / SQL Server.
    #[default]
    TSql,
    Sqlite,
}

impl Dialect {
    /// Render `expr` (an integer expression) as text.
    pub fn integer_to_text(&self, expr: &str) -> String {
        match self {
            Self::TSql => format!("STR({expr})"),
            Self::Sqlite => format!("CAST({expr} AS TEXT)"),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TSql => write!(f, "tsql"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// SQL text plus its bound parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<String>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<String>) -> Self {
        Self { sql: sql.into(), params }
    }

    /// Number of `?` markers in the SQL text.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

/// Comma-separated placeholder list for an `IN (...)` clause.
///
/// An empty list would render `IN ()`, which SQL Server rejects as a syntax
/// error.  Not every driver does (SQLite accepts it and matches nothing), so
/// the error is raised here to keep the failure independent of the backend.
pub fn in_placeholders(count: usize) -> Result<String, DbError> {
    if count == 0 {
        return Err(DbError::EmptyInList);
    }
    Ok(vec!["?"; count].join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_match_member_count() {
        assert_eq!(in_placeholders(1).unwrap(), "?");
        assert_eq!(in_placeholders(3).unwrap(), "?,?,?");
    }

    #[test]
    fn empty_in_list_is_a_query_error() {
        assert!(matches!(in_placeholders(0), Err(DbError::EmptyInList)));
    }

    #[test]
    fn placeholder_count_counts_question_marks() {
        let stmt = Statement::new("SELECT 1 WHERE a IN (?,?) AND b = ?", vec![]);
        assert_eq!(stmt.placeholder_count(), 3);
    }

    #[test]
    fn integer_to_text_per_dialect() {
        assert_eq!(Dialect::TSql.integer_to_text("x + 1"), "STR(x + 1)");
        assert_eq!(Dialect::Sqlite.integer_to_text("x + 1"), "CAST(x + 1 AS TEXT)");
        assert_eq!(Dialect::default(), Dialect::TSql);
    }
}
