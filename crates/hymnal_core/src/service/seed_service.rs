//! Bundled catalog seeding.
//!
//! # Responsibility
//! - Load the hymn books shipped as JSON assets.
//! - Write them into a freshly created store in one batch.
//!
//! # Invariants
//! - A missing or blank asset file is skipped, not an error.
//! - A malformed asset file aborts seeding before anything is written.

use crate::db::converter;
use crate::db::DbError;
use crate::model::hymn_book::{HymnBook, HymnalType};
use crate::repo::hymns_dao::{HymnsDao, RepoResult};
use log::{info, warn};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

/// Reads the bundled asset for `kind` from `assets_dir`.
///
/// Returns `Ok(None)` when the edition ships no asset, or the file is
/// missing or blank.
pub fn read_bundled_book(assets_dir: &Path, kind: HymnalType) -> RepoResult<Option<HymnBook>> {
    let Some(file_name) = kind.asset_file_name() else {
        return Ok(None);
    };

    let path = assets_dir.join(file_name);
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(
                "event=seed_asset module=seed status=skipped type={} reason=missing file={}",
                kind.as_db(),
                file_name
            );
            return Ok(None);
        }
        Err(err) => return Err(DbError::Io(err).into()),
    };

    if text.trim().is_empty() {
        warn!(
            "event=seed_asset module=seed status=skipped type={} reason=blank file={}",
            kind.as_db(),
            file_name
        );
        return Ok(None);
    }

    let hymns = converter::decode(Some(&text))?;
    Ok(Some(HymnBook::new(kind, kind.default_name(), hymns)))
}

/// Seeds every bundled book found in `assets_dir`.
///
/// Returns the number of books written.
pub fn seed_bundled_books<D: HymnsDao>(dao: &D, assets_dir: &Path) -> RepoResult<usize> {
    let started_at = Instant::now();
    let mut books = Vec::new();
    for kind in HymnalType::ALL {
        if let Some(book) = read_bundled_book(assets_dir, kind)? {
            books.push(book);
        }
    }

    dao.insert_all(&books)?;
    info!(
        "event=seed_catalog module=seed status=ok books={} duration_ms={}",
        books.len(),
        started_at.elapsed().as_millis()
    );
    Ok(books.len())
}
