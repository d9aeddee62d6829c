//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// An `IN (...)` clause was rendered with no members.
    #[error("query error: IN clause requires at least one value")]
    EmptyInList,

    /// The provider could not hand out a connection.
    #[error("connection error: {0}")]
    Connection(String),

    /// Failure reported by a non-sqlx driver (test doubles, mostly).
    #[error("driver error: {0}")]
    Driver(String),
}
