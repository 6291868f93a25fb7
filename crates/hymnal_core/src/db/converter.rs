//! JSON column codec for hymn lists.
//!
//! # Responsibility
//! - Encode an ordered hymn list into one JSON array string.
//! - Decode that string back, rejecting anything that is not a hymn array.
//!
//! # Invariants
//! - `decode(Some(&encode(hymns)?))` returns `hymns` unchanged.
//! - Absent, blank and `null` input decode to an empty list.
//! - Decoding never returns a partially parsed list.

use crate::model::hymn::Hymn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Hymn JSON could not be encoded from, or decoded into, a hymn list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDataError {
    /// 1-based line reported by the parser (0 when unknown).
    pub line: usize,
    /// 1-based column reported by the parser (0 when unknown).
    pub column: usize,
    pub message: String,
}

impl Display for MalformedDataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "malformed hymn list at line {} column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl Error for MalformedDataError {}

impl From<serde_json::Error> for MalformedDataError {
    fn from(value: serde_json::Error) -> Self {
        Self {
            line: value.line(),
            column: value.column(),
            message: value.to_string(),
        }
    }
}

/// Encodes hymns as a JSON array.
///
/// Field order follows the `Hymn` definition, so equal inputs always produce
/// byte-identical output.
///
/// # Errors
/// - Returns the serializer failure instead of storing a substitute value.
pub fn encode(hymns: &[Hymn]) -> Result<String, MalformedDataError> {
    Ok(serde_json::to_string(hymns)?)
}

/// Decodes a stored JSON column into hymns.
///
/// # Errors
/// - Returns `MalformedDataError` for invalid JSON, truncated input, or any
///   value that is not an array of hymn objects.
pub fn decode(text: Option<&str>) -> Result<Vec<Hymn>, MalformedDataError> {
    let Some(text) = text else {
        return Ok(Vec::new());
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let hymns: Option<Vec<Hymn>> = serde_json::from_str(trimmed)?;
    Ok(hymns.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use crate::model::hymn::Hymn;

    #[test]
    fn blank_and_null_input_decode_to_empty() {
        assert!(decode(None).unwrap().is_empty());
        assert!(decode(Some("")).unwrap().is_empty());
        assert!(decode(Some("  \n")).unwrap().is_empty());
        assert!(decode(Some("null")).unwrap().is_empty());
        assert!(decode(Some("[]")).unwrap().is_empty());
    }

    #[test]
    fn encode_is_deterministic() {
        let hymns = vec![Hymn::new(1, "Praise to the Lord", "verse")];

        assert_eq!(encode(&hymns).unwrap(), encode(&hymns.clone()).unwrap());
        assert_eq!(
            encode(&hymns).unwrap(),
            r#"[{"number":1,"title":"Praise to the Lord","lyrics":"verse","favorite":false}]"#
        );
    }

    #[test]
    fn encode_of_empty_list_is_an_empty_array() {
        assert_eq!(encode(&[]).unwrap(), "[]");
    }

    #[test]
    fn truncated_input_reports_position() {
        let err = decode(Some(r#"[{"number":1,"title":"Praise"#)).unwrap_err();

        assert_eq!(err.line, 1);
        assert!(err.column > 0);
    }

    #[test]
    fn object_instead_of_array_is_rejected() {
        let err = decode(Some(r#"{"number":1,"title":"x","lyrics":"y"}"#)).unwrap_err();
        assert!(err.to_string().contains("malformed hymn list"));
    }
}
