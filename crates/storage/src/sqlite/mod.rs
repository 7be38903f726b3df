//! SQLite storage implementation.
//!
//! One `Storage` struct over an r2d2 connection pool, split into one module
//! per table family. All methods are synchronous.

#![allow(
    clippy::as_conversions,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust usize conversions are safe within DB row counts"
)]

mod backend;
mod interventions;
mod nudges;
mod posts;
mod rooms;
mod stats;
mod users;

use std::path::Path;

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use serde::Serialize;

use crate::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping a SQLite connection pool.
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Row counts across the main tables, for the CLI `stats` command.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StorageStats {
    pub room_count: i64,
    pub user_count: i64,
    pub post_count: i64,
    pub intervention_count: i64,
}

impl Storage {
    /// Open (or create) the database at `db_path` and run migrations.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::new(manager)?;
        let conn = pool.get()?;
        migrations::run_migrations(&conn)
            .map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);
        Ok(Self { pool })
    }

    pub(crate) fn conn(&self) -> Result<PooledConn, StorageError> {
        Ok(self.pool.get()?)
    }
}

/// Parse an RFC 3339 timestamp from a TEXT column.
pub(crate) fn parse_ts(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Parse JSON from a TEXT column, converting error to rusqlite error.
pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(s: &str) -> rusqlite::Result<T> {
    serde_json::from_str(s).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Phase index as bound in SQL. Pairs with `IS ?` so a null phase matches
/// only null rows, never a concrete index.
pub(crate) fn phase_to_sql(phase_index: Option<u32>) -> Option<i64> {
    phase_index.map(i64::from)
}

/// Phase index read back from SQL.
pub(crate) fn phase_from_sql(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}
