//! `db` crate — the SQL gateway's persistence layer.
//!
//! Provides the [`ConnectionProvider`] seam, a SQLite-backed provider, the
//! opaque row model, and one repository function per gateway operation
//! against the `saq` schema.  No invocation plumbing lives here.

pub mod error;
pub mod mock;
pub mod models;
pub mod provider;
pub mod repository;
pub mod schema;
pub mod statement;

pub use error::DbError;
pub use models::{Row, SqlValue};
pub use provider::{ConnectionProvider, SqlConnection, SqliteConfig, SqliteProvider};
pub use statement::{Dialect, Statement};
