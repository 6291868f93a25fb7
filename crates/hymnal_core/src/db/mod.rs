//! SQLite storage bootstrap, schema policy and change tracking.
//!
//! # Responsibility
//! - Open and configure the SQLite connection backing the hymnal.
//! - Enforce the destructive schema policy before any data access.
//! - Convert hymn lists to and from their JSON column encoding.
//! - Track table writes so reactive queries can re-run.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write hymn data before the schema is in place.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod converter;
mod database;
pub mod invalidation;
pub mod migrations;
mod open;

pub use database::{HymnalDatabase, DB_NAME};
pub use migrations::SchemaState;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage error raised when the backing store is unavailable or rejects a
/// statement (disk full, permission denied, locked file, ...).
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "storage i/o failure: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
