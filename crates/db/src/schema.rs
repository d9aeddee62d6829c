//! Schema bootstrap for local databases.
//!
//! Fabric manages the production schema; this creates the same tables in a
//! development database (see `migrations/0001_saq_schema.sql`).

use tracing::info;

use crate::provider::{release, ConnectionProvider};
use crate::{DbError, Statement};

const SAQ_SCHEMA_SQL: &str = include_str!("../../../migrations/0001_saq_schema.sql");

/// Split the embedded schema script into individual statements.
pub fn schema_statements() -> Vec<Statement> {
    let without_comments: String = SAQ_SCHEMA_SQL
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(str::trim)
        .filter(|sql| !sql.is_empty())
        .map(|sql| Statement::new(sql, Vec::new()))
        .collect()
}

/// Create every `saq` table that does not exist yet, in one transaction.
pub async fn init_schema(provider: &dyn ConnectionProvider) -> Result<usize, DbError> {
    let statements = schema_statements();
    info!("Creating saq schema ({} tables)", statements.len());

    let mut conn = provider.connect().await?;
    let mut outcome: Result<(), DbError> = Ok(());
    for statement in &statements {
        if let Err(e) = conn.execute(statement).await {
            outcome = Err(e);
            break;
        }
    }
    if outcome.is_ok() {
        outcome = conn.commit().await;
    }
    release(conn, outcome).await?;

    Ok(statements.len())
}
