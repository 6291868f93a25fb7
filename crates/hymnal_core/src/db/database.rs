//! Database handle owning the hymnal store.
//!
//! # Responsibility
//! - Own the single SQLite connection for one store file.
//! - Hand out the `HymnsDao` sharing that connection and its change tracker.
//!
//! # Invariants
//! - One `HymnalDatabase` per store file per process.
//! - Every DAO handed out shares this instance's invalidation tracker, so a
//!   write through any of them reaches every subscriber.

use super::invalidation::InvalidationTracker;
use super::migrations::{self, SchemaState};
use super::open::{open_db, open_db_in_memory};
use super::DbResult;
use crate::repo::hymns_dao::SqliteHymnsDao;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default store file name inside the data directory.
pub const DB_NAME: &str = "hymnal-db";

/// Explicit handle to the on-device hymnal store.
#[derive(Debug)]
pub struct HymnalDatabase {
    conn: Arc<Mutex<Connection>>,
    tracker: Arc<InvalidationTracker>,
    schema_state: SchemaState,
    path: Option<PathBuf>,
}

impl HymnalDatabase {
    /// Opens `data_dir/name`, creating the directory and file when absent.
    ///
    /// A store written by another schema version is wiped and recreated.
    pub fn open(data_dir: impl AsRef<Path>, name: &str) -> DbResult<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;
        let path = data_dir.join(name);
        let (conn, schema_state) = open_db(&path)?;
        Ok(Self::from_parts(conn, schema_state, Some(path)))
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        let (conn, schema_state) = open_db_in_memory()?;
        Ok(Self::from_parts(conn, schema_state, None))
    }

    fn from_parts(conn: Connection, schema_state: SchemaState, path: Option<PathBuf>) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            tracker: Arc::new(InvalidationTracker::new()),
            schema_state,
            path,
        }
    }

    /// Returns the hymn book access point.
    pub fn hymns_dao(&self) -> SqliteHymnsDao {
        SqliteHymnsDao::new(Arc::clone(&self.conn), Arc::clone(&self.tracker))
    }

    /// How the schema was brought up to date when this handle was opened.
    pub fn schema_state(&self) -> SchemaState {
        self.schema_state
    }

    /// Store file path; `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Marks the store unversioned so the next open recreates it as fresh.
    pub(crate) fn reset_schema_version(&self) -> DbResult<()> {
        migrations::reset_user_version(&self.conn.lock())
    }

    /// Number of live (not yet pruned) reactive query subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tracker.observer_count()
    }
}
