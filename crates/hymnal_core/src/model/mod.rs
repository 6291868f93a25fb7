//! Hymnal domain model.
//!
//! # Responsibility
//! - Define the value types shared by storage, services and callers.
//! - Keep the wire shape of a hymn stable for the JSON column encoding.
//!
//! # Invariants
//! - A `Hymn` never exists as its own row; it is always owned by a `HymnBook`.
//! - A `HymnBook` is keyed by exactly one `HymnalType`.

pub mod hymn;
pub mod hymn_book;
