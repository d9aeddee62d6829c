//! Repository functions — one function per gateway operation.
//!
//! Every function takes a `&dyn ConnectionProvider`, opens exactly one
//! connection, issues exactly one statement, and closes the connection on
//! every exit path.  No validation, no retries — failures propagate as-is.

use crate::provider::{release, ConnectionProvider};
use crate::{DbError, Row, Statement};

pub mod alcools;
pub mod cocktails;
pub mod shops;

pub use alcools::write_alcool;
pub use cocktails::{read_cocktails, write_cocktaildetails};
pub use shops::read_stocks_in_shops;

/// Schema every gateway table lives in.
pub const SCHEMA: &str = "saq";

/// Connect, run one query, close.
async fn fetch_rows(
    provider: &dyn ConnectionProvider,
    statement: &Statement,
) -> Result<Vec<Row>, DbError> {
    let mut conn = provider.connect().await?;
    let outcome = conn.fetch_all(statement).await;
    release(conn, outcome).await
}

/// Connect, run one write, commit, close.
///
/// A failed write is never committed; closing the connection discards it.
async fn execute_and_commit(
    provider: &dyn ConnectionProvider,
    statement: &Statement,
) -> Result<(), DbError> {
    let mut conn = provider.connect().await?;
    let outcome = match conn.execute(statement).await {
        Ok(_) => conn.commit().await,
        Err(e) => Err(e),
    };
    release(conn, outcome).await
}

/// Text confirmation returned by the insert operations.
fn added_message(name: &str) -> String {
    format!("The {name} was added to this table.")
}
