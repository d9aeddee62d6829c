//! SQLite-backed connection provider.
//!
//! Connections come from a lazily-filled pool.  Each pooled connection opens a
//! private temporary main database and attaches the configured file as `saq`,
//! so schema-qualified identifiers such as `[saq].[ListAlcools]` resolve
//! without rewriting the SQL.

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row as _, Sqlite, SqlitePool, Transaction, TypeInfo, ValueRef};
use tracing::{debug, info};

use crate::provider::{ConnectionProvider, SqlConnection};
use crate::repository::SCHEMA;
use crate::{DbError, Dialect, Row, SqlValue, Statement};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Where the SQLite provider finds its data.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database file attached as the `saq` schema.  Created on first attach.
    pub database_path: PathBuf,
    /// Pool ceiling.
    pub max_connections: u32,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("saq.db"),
            max_connections: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// SqliteProvider
// ---------------------------------------------------------------------------

/// Hands out one pooled connection per call to `connect`.
#[derive(Debug, Clone)]
pub struct SqliteProvider {
    config: SqliteConfig,
    pool: SqlitePool,
}

impl SqliteProvider {
    /// Build the provider.  No connection is opened until the first
    /// `connect`, but this must run inside a Tokio runtime.
    pub fn new(config: SqliteConfig) -> Result<Self, DbError> {
        let attach_path = config
            .database_path
            .to_str()
            .ok_or_else(|| {
                DbError::Connection(format!(
                    "database path is not valid UTF-8: {}",
                    config.database_path.display()
                ))
            })?
            .to_owned();

        info!(
            "Preparing sqlite pool for {} (max_connections={})",
            attach_path, config.max_connections
        );

        // An empty filename is a private on-disk temporary database.  The main
        // database must not be in-memory: attached files inherit its open
        // flags, and an in-memory main would attach an in-memory `saq` too.
        let options = SqliteConnectOptions::new()
            .filename("")
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .after_connect(move |conn, _meta| {
                let path = attach_path.clone();
                Box::pin(async move {
                    debug!("Attaching {} as {}", path, SCHEMA);
                    let attach = format!("ATTACH DATABASE ? AS [{SCHEMA}]");
                    sqlx::query(&attach).bind(path).execute(&mut *conn).await?;
                    Ok(())
                })
            })
            .connect_lazy_with(options);

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    /// Close every pooled connection.  Sessions still checked out finish
    /// first.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ConnectionProvider for SqliteProvider {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn connect(&self) -> Result<Box<dyn SqlConnection>, DbError> {
        let tx = self.pool.begin().await?;
        debug!("Opened sqlite session");
        Ok(Box::new(SqliteSession {
            pool: self.pool.clone(),
            tx: Some(tx),
        }))
    }
}

// ---------------------------------------------------------------------------
// SqliteSession
// ---------------------------------------------------------------------------

/// One pooled connection, DB-API style: statements run inside a transaction
/// that `commit` ends.  A statement after `commit` starts a new one.
/// Anything still pending at `close` is rolled back.
struct SqliteSession {
    pool: SqlitePool,
    tx: Option<Transaction<'static, Sqlite>>,
}

impl SqliteSession {
    async fn transaction(&mut self) -> Result<&mut Transaction<'static, Sqlite>, DbError> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        Ok(self.tx.insert(tx))
    }
}

#[async_trait]
impl SqlConnection for SqliteSession {
    async fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<Row>, DbError> {
        let mut query = sqlx::query(&statement.sql);
        for param in &statement.params {
            query = query.bind(param.as_str());
        }

        let tx = self.transaction().await?;
        let rows = query.fetch_all(&mut **tx).await?;
        rows.iter().map(decode_row).collect()
    }

    async fn execute(&mut self, statement: &Statement) -> Result<u64, DbError> {
        let mut query = sqlx::query(&statement.sql);
        for param in &statement.params {
            query = query.bind(param.as_str());
        }

        let tx = self.transaction().await?;
        let done = query.execute(&mut **tx).await?;
        Ok(done.rows_affected())
    }

    async fn commit(&mut self) -> Result<(), DbError> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<(), DbError> {
        // The connection goes back to the pool when `tx` is consumed, whether
        // or not the rollback succeeds.
        let rolled_back = match self.tx {
            Some(tx) => tx.rollback().await,
            None => Ok(()),
        };
        debug!("Released sqlite session");
        rolled_back?;
        Ok(())
    }
}

/// Convert a driver row into an opaque [`Row`], typing each cell by the
/// storage class SQLite reports for it.
fn decode_row(row: &SqliteRow) -> Result<Row, DbError> {
    let mut values = Vec::with_capacity(row.len());

    for index in 0..row.len() {
        let (is_null, storage) = {
            let raw = row.try_get_raw(index)?;
            (raw.is_null(), raw.type_info().name().to_owned())
        };

        let value = if is_null {
            SqlValue::Null
        } else {
            match storage.as_str() {
                "INTEGER" => SqlValue::Integer(row.try_get(index)?),
                "REAL" => SqlValue::Real(row.try_get(index)?),
                "BLOB" => SqlValue::Blob(row.try_get(index)?),
                _ => SqlValue::Text(row.try_get(index)?),
            }
        };
        values.push(value);
    }

    Ok(Row::new(values))
}
