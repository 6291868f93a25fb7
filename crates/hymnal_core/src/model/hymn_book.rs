//! Hymn book entity.
//!
//! # Responsibility
//! - Define the closed set of hymnal editions (`HymnalType`).
//! - Define the `HymnBook` entity persisted as one `hymnbooks` row.
//!
//! # Invariants
//! - `HymnalType` maps to a fixed integer stored in `hymnbooks.type`.
//! - At most one `HymnBook` exists per `HymnalType`.
//! - Book updates replace the whole hymn list.

use crate::model::hymn::Hymn;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Hymnal edition / language variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HymnalType {
    English,
    EnglishOld,
    Spanish,
}

impl HymnalType {
    /// Every known edition in primary-key order.
    pub const ALL: [HymnalType; 3] = [Self::English, Self::EnglishOld, Self::Spanish];

    /// Integer stored in `hymnbooks.type`.
    pub fn as_db(self) -> i64 {
        match self {
            Self::English => 1,
            Self::EnglishOld => 2,
            Self::Spanish => 3,
        }
    }

    /// Parses a stored `hymnbooks.type` value.
    pub fn from_db(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::English),
            2 => Some(Self::EnglishOld),
            3 => Some(Self::Spanish),
            _ => None,
        }
    }

    /// Display name used when a book is seeded from bundled assets.
    pub fn default_name(self) -> &'static str {
        match self {
            Self::English => "SDA Hymnal",
            Self::EnglishOld => "SDA hymnal (Old)",
            Self::Spanish => "Himnario Adventista",
        }
    }

    pub fn language(self) -> &'static str {
        match self {
            Self::English | Self::EnglishOld => "English",
            Self::Spanish => "Spanish",
        }
    }

    /// Bundled asset file for this edition, if one ships with the app.
    pub fn asset_file_name(self) -> Option<&'static str> {
        match self {
            Self::English => Some("sdah.json"),
            Self::EnglishOld => Some("sdah_old.json"),
            Self::Spanish => None,
        }
    }
}

impl Display for HymnalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.default_name())
    }
}

/// One hymnal edition with its full, ordered hymn list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HymnBook {
    /// Primary key. Serialized as `type` to match the column name.
    #[serde(rename = "type")]
    pub kind: HymnalType,
    pub name: String,
    pub language: String,
    pub hymns: Vec<Hymn>,
}

impl HymnBook {
    /// Creates a book using the edition's default language.
    pub fn new(kind: HymnalType, name: impl Into<String>, hymns: Vec<Hymn>) -> Self {
        Self {
            kind,
            name: name.into(),
            language: kind.language().to_string(),
            hymns,
        }
    }

    /// Finds a hymn by its number within this book.
    pub fn hymn(&self, number: i32) -> Option<&Hymn> {
        self.hymns.iter().find(|hymn| hymn.number == number)
    }

    pub fn len(&self) -> usize {
        self.hymns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hymns.is_empty()
    }
}
