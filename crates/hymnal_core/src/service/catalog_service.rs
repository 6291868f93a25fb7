//! Hymn catalog use-case service.
//!
//! # Responsibility
//! - Provide book and hymn lookups for callers.
//! - Delegate persistence to a `HymnsDao` implementation.
//!
//! # Invariants
//! - Service layer remains storage-agnostic.
//! - Book replacement goes through the repository upsert contract.

use crate::model::hymn::Hymn;
use crate::model::hymn_book::{HymnBook, HymnalType};
use crate::repo::hymns_dao::{HymnsDao, RepoResult};
use crate::repo::query_stream::QueryStream;

/// Use-case wrapper over the hymn book repository.
pub struct CatalogService<D: HymnsDao> {
    dao: D,
}

impl<D: HymnsDao> CatalogService<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    /// Returns every stored book.
    pub fn books(&self) -> RepoResult<Vec<HymnBook>> {
        self.dao.get_all_books()
    }

    pub fn book(&self, kind: HymnalType) -> RepoResult<Option<HymnBook>> {
        self.dao.get_by_type(kind)
    }

    /// Looks up one hymn by number within a book.
    ///
    /// Returns `Ok(None)` when either the book or the hymn is missing.
    pub fn hymn(&self, kind: HymnalType, number: i32) -> RepoResult<Option<Hymn>> {
        let book = self.dao.get_by_type(kind)?;
        Ok(book.and_then(|book| book.hymn(number).cloned()))
    }

    /// Follows one book as it changes.
    pub fn watch_book(&self, kind: HymnalType) -> QueryStream<HymnBook> {
        self.dao.find_by_type(kind)
    }

    /// Replaces a book and its whole hymn list.
    pub fn replace_book(&self, book: &HymnBook) -> RepoResult<()> {
        self.dao.update(book)
    }
}
