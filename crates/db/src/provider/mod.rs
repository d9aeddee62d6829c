//! The connection seam every gateway function is written against.
//!
//! A [`ConnectionProvider`] is injected into each repository function; it
//! hands out one [`SqlConnection`] per invocation.  The connection is owned by
//! that invocation and is consumed by [`SqlConnection::close`], so it cannot
//! be reused once released.

use async_trait::async_trait;

use crate::{DbError, Dialect, Row, Statement};

pub mod sqlite;

pub use sqlite::{SqliteConfig, SqliteProvider};

/// Source of database sessions.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// SQL flavour understood by the connections this provider returns.
    fn dialect(&self) -> Dialect {
        Dialect::TSql
    }

    /// Open a fresh session.
    async fn connect(&self) -> Result<Box<dyn SqlConnection>, DbError>;
}

/// An open database session, DB-API style.
///
/// Writes are not visible to other sessions until [`commit`](Self::commit);
/// closing without committing discards them.
#[async_trait]
pub trait SqlConnection: Send {
    /// Run a query and collect every row it returns.
    async fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<Row>, DbError>;

    /// Run a data-modifying statement, returning the number of rows affected.
    async fn execute(&mut self, statement: &Statement) -> Result<u64, DbError>;

    async fn commit(&mut self) -> Result<(), DbError>;

    /// Release the session.
    async fn close(self: Box<Self>) -> Result<(), DbError>;
}

/// Close `conn`, then hand back `outcome`.
///
/// The connection is closed whether or not `outcome` is an error.  When both
/// the work and the close fail, the work's error wins.
pub async fn release<T>(
    conn: Box<dyn SqlConnection>,
    outcome: Result<T, DbError>,
) -> Result<T, DbError> {
    let closed = conn.close().await;
    let value = outcome?;
    closed?;
    Ok(value)
}
