//! Hymn book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the only persistence access point for `HymnBook` rows.
//! - Keep SQL and JSON column details inside the storage boundary.
//! - Signal the invalidation tracker after every effective write.
//!
//! # Invariants
//! - Writes are upserts keyed by `hymnbooks.type`; a conflicting row is
//!   replaced wholesale, never merged.
//! - A malformed `hymns` column fails the whole read that touched it.
//! - Writes that change no row do not notify subscribers.

use crate::db::converter::{self, MalformedDataError};
use crate::db::invalidation::InvalidationTracker;
use crate::db::DbError;
use crate::model::hymn_book::{HymnBook, HymnalType};
use crate::repo::query_stream::QueryStream;
use log::{debug, warn};
use parking_lot::Mutex;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

const HYMNBOOKS_TABLE: &str = "hymnbooks";

const BOOK_SELECT_SQL: &str = "SELECT
    type,
    name,
    language,
    hymns
FROM hymnbooks";

const BOOK_UPSERT_SQL: &str = "INSERT OR REPLACE INTO hymnbooks (
    type,
    name,
    language,
    hymns
) VALUES (?1, ?2, ?3, ?4);";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for hymn book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// The backing store failed or is unavailable.
    Storage(DbError),
    /// A stored hymn list could not be decoded.
    MalformedData(MalformedDataError),
    /// A stored column holds a value outside its domain.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::MalformedData(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted hymn book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::MalformedData(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

impl From<MalformedDataError> for RepoError {
    fn from(value: MalformedDataError) -> Self {
        Self::MalformedData(value)
    }
}

/// Repository interface for hymn book storage.
///
/// Mutations block on storage I/O; keep them off any UI thread.
pub trait HymnsDao {
    /// Streams a snapshot of every book, re-emitted on each table write.
    ///
    /// Callers must not depend on row order.
    fn list_all_books(&self) -> QueryStream<Vec<HymnBook>>;
    /// Streams the book of `kind` whenever that row changes.
    ///
    /// Emits nothing while no such row exists.
    fn find_by_type(&self, kind: HymnalType) -> QueryStream<HymnBook>;
    /// One-shot read of every book.
    fn get_all_books(&self) -> RepoResult<Vec<HymnBook>>;
    /// One-shot read of one book.
    fn get_by_type(&self, kind: HymnalType) -> RepoResult<Option<HymnBook>>;
    fn insert(&self, book: &HymnBook) -> RepoResult<()>;
    /// Upserts every book in one transaction.
    fn insert_all(&self, books: &[HymnBook]) -> RepoResult<()>;
    /// Same replace semantics as `insert`.
    fn update(&self, book: &HymnBook) -> RepoResult<()>;
    /// Removes the row keyed by `book.kind`; no-op when absent.
    fn delete(&self, book: &HymnBook) -> RepoResult<()>;
}

/// SQLite-backed hymn book repository.
#[derive(Clone)]
pub struct SqliteHymnsDao {
    conn: Arc<Mutex<Connection>>,
    tracker: Arc<InvalidationTracker>,
}

impl SqliteHymnsDao {
    pub(crate) fn new(conn: Arc<Mutex<Connection>>, tracker: Arc<InvalidationTracker>) -> Self {
        Self { conn, tracker }
    }

    fn notify_changed(&self, operation: &str, rows: usize) {
        debug!(
            "event=hymnbooks_write module=repo status=ok op={} rows={}",
            operation, rows
        );
        if rows > 0 {
            self.tracker.notify(HYMNBOOKS_TABLE);
        }
    }
}

impl HymnsDao for SqliteHymnsDao {
    fn list_all_books(&self) -> QueryStream<Vec<HymnBook>> {
        let conn = Arc::clone(&self.conn);
        QueryStream::new(self.tracker.subscribe(HYMNBOOKS_TABLE), move || {
            query_all_books(&conn.lock()).map(Some)
        })
    }

    fn find_by_type(&self, kind: HymnalType) -> QueryStream<HymnBook> {
        let conn = Arc::clone(&self.conn);
        QueryStream::new(self.tracker.subscribe(HYMNBOOKS_TABLE), move || {
            query_book(&conn.lock(), kind)
        })
        .distinct_until_changed()
    }

    fn get_all_books(&self) -> RepoResult<Vec<HymnBook>> {
        query_all_books(&self.conn.lock())
    }

    fn get_by_type(&self, kind: HymnalType) -> RepoResult<Option<HymnBook>> {
        query_book(&self.conn.lock(), kind)
    }

    fn insert(&self, book: &HymnBook) -> RepoResult<()> {
        let changed = upsert_book(&self.conn.lock(), book)?;
        self.notify_changed("insert", changed);
        Ok(())
    }

    fn insert_all(&self, books: &[HymnBook]) -> RepoResult<()> {
        if books.is_empty() {
            return Ok(());
        }

        let changed = {
            let mut conn = self.conn.lock();
            let tx = conn.transaction()?;
            let mut changed = 0;
            for book in books {
                changed += upsert_book(&tx, book)?;
            }
            tx.commit()?;
            changed
        };
        self.notify_changed("insert_all", changed);
        Ok(())
    }

    fn update(&self, book: &HymnBook) -> RepoResult<()> {
        let changed = upsert_book(&self.conn.lock(), book)?;
        self.notify_changed("update", changed);
        Ok(())
    }

    fn delete(&self, book: &HymnBook) -> RepoResult<()> {
        let changed = self.conn.lock().execute(
            "DELETE FROM hymnbooks WHERE type = ?1;",
            [book.kind.as_db()],
        )?;
        self.notify_changed("delete", changed);
        Ok(())
    }
}

fn upsert_book(conn: &Connection, book: &HymnBook) -> RepoResult<usize> {
    let hymns = converter::encode(&book.hymns)?;
    let changed = conn.execute(
        BOOK_UPSERT_SQL,
        params![
            book.kind.as_db(),
            book.name.as_str(),
            book.language.as_str(),
            hymns,
        ],
    )?;
    Ok(changed)
}

fn query_all_books(conn: &Connection) -> RepoResult<Vec<HymnBook>> {
    let mut stmt = conn.prepare(&format!("{BOOK_SELECT_SQL} ORDER BY type ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut books = Vec::new();

    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }

    Ok(books)
}

fn query_book(conn: &Connection, kind: HymnalType) -> RepoResult<Option<HymnBook>> {
    let mut stmt = conn.prepare(&format!("{BOOK_SELECT_SQL} WHERE type = ?1 LIMIT 1;"))?;
    let mut rows = stmt.query([kind.as_db()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_book_row(row)?));
    }

    Ok(None)
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<HymnBook> {
    let type_value: i64 = row.get("type")?;
    let kind = HymnalType::from_db(type_value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid hymnal type `{type_value}` in hymnbooks.type"))
    })?;

    let hymns_text: Option<String> = row.get("hymns")?;
    let hymns = converter::decode(hymns_text.as_deref()).map_err(|err| {
        warn!(
            "event=hymnbook_decode module=repo status=error type={} line={} column={}",
            type_value, err.line, err.column
        );
        err
    })?;

    Ok(HymnBook {
        kind,
        name: row.get("name")?,
        language: row.get("language")?,
        hymns,
    })
}
