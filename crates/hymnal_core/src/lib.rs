//! Core storage for the hymnal reader.
//! This crate owns hymn book persistence and its reactive query contract.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::HymnalConfig;
pub use db::converter::MalformedDataError;
pub use db::{DbError, DbResult, HymnalDatabase, SchemaState, DB_NAME};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::hymn::Hymn;
pub use model::hymn_book::{HymnBook, HymnalType};
pub use repo::hymns_dao::{HymnsDao, RepoError, RepoResult, SqliteHymnsDao};
pub use repo::query_stream::QueryStream;
pub use service::catalog_service::CatalogService;
pub use service::seed_service::{read_bundled_book, seed_bundled_books};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
