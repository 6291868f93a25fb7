//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the hymn book data access contract.
//! - Isolate SQLite query details from service orchestration.
//! - Expose reactive queries as `QueryStream`s.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`MalformedData`, `InvalidData`)
//!   in addition to storage errors.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod hymns_dao;
pub mod query_stream;
