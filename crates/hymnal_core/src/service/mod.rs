//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Seed bundled hymn books into a freshly created store.

pub mod catalog_service;
pub mod seed_service;
