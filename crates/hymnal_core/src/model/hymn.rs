//! Hymn value model.
//!
//! # Responsibility
//! - Define the canonical in-memory shape of one hymn.
//! - Own the JSON field naming used inside the `hymnbooks.hymns` column.
//!
//! # Invariants
//! - `number` identifies the hymn within its owning book.
//! - Optional metadata is omitted from JSON when absent and accepted when
//!   missing, so older payloads still decode.

use serde::{Deserialize, Serialize};

/// One hymn as stored inside a hymn book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hymn {
    /// Hymn number within the owning book.
    pub number: i32,
    pub title: String,
    /// Multi-line body text. Serialized as `lyrics` to match bundled assets.
    #[serde(rename = "lyrics")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<String>,
    /// Musical key, e.g. `"F Major"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

impl Hymn {
    /// Creates a hymn with no metadata.
    pub fn new(number: i32, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            content: content.into(),
            edited: None,
            composer: None,
            author: None,
            tempo: None,
            key: None,
            favorite: false,
        }
    }

    /// Returns whether any authorship/tune metadata is present.
    pub fn has_metadata(&self) -> bool {
        self.edited.is_some()
            || self.composer.is_some()
            || self.author.is_some()
            || self.tempo.is_some()
            || self.key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::Hymn;

    #[test]
    fn new_hymn_has_no_metadata() {
        let hymn = Hymn::new(1, "Praise to the Lord", "Praise to the Lord, the Almighty");

        assert_eq!(hymn.number, 1);
        assert!(!hymn.has_metadata());
        assert!(!hymn.favorite);
    }

    #[test]
    fn metadata_is_detected() {
        let mut hymn = Hymn::new(2, "All Creatures", "...");
        hymn.composer = Some("Geistliche Kirchengesang".to_string());

        assert!(hymn.has_metadata());
    }
}
