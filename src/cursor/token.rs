// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt::Display;

use anyhow::bail;

/// Interface for encoding and decoding opaque pagination cursors.
pub trait Cursor: Sized + Clone {
    /// Error type of the decoder.
    type Error;

    /// Decodes an encoded cursor string.
    fn decode(encoded: &str) -> Result<Self, Self::Error>;

    /// Encodes the cursor into an opaque string.
    fn encode(&self) -> String;
}

// Tag marking cursors of this subsystem, decoding rejects everything else early
const CURSOR_TAG: &str = "wc";

const CURSOR_SEPARATOR: char = ':';

/// Cursor aiding pagination, represented as a base58-encoded string.
///
/// The encoding ensures that the cursor stays opaque, API consumers do not read any further
/// semantic meaning into it, even though the row identifier it carries is what the controller
/// resolves into a reference entity.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PaginationCursor {
    /// Identifier of the row this cursor points at.
    pub id: i64,
}

impl PaginationCursor {
    /// Returns a new cursor pointing at the given row.
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl Display for PaginationCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl Cursor for PaginationCursor {
    type Error = anyhow::Error;

    fn decode(encoded: &str) -> Result<Self, Self::Error> {
        let bytes = bs58::decode(encoded).into_vec()?;
        let decoded = std::str::from_utf8(&bytes)?;

        let parts: Vec<&str> = decoded.split(CURSOR_SEPARATOR).collect();
        match parts[..] {
            [tag, id] if tag == CURSOR_TAG => Ok(Self::new(id.parse()?)),
            _ => {
                bail!("Invalid cursor format");
            }
        }
    }

    fn encode(&self) -> String {
        bs58::encode(format!("{}{}{}", CURSOR_TAG, CURSOR_SEPARATOR, self.id).as_bytes())
            .into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{Cursor, PaginationCursor};

    #[test]
    fn encode_roundtrip() {
        let cursor = PaginationCursor::new(42);
        let encoded = cursor.encode();

        // Raw identifier does not appear in the encoded form
        assert!(!encoded.contains("42"));

        assert_eq!(PaginationCursor::decode(&encoded).unwrap(), cursor);
    }

    #[test]
    fn decode_rejects_garbage() {
        // Not valid base58
        assert!(PaginationCursor::decode("0OIl").is_err());

        // Valid base58 of something which is not a cursor
        let encoded = bs58::encode("no-separator".as_bytes()).into_string();
        assert!(PaginationCursor::decode(&encoded).is_err());

        // Wrong tag
        let encoded = bs58::encode("order:42".as_bytes()).into_string();
        assert!(PaginationCursor::decode(&encoded).is_err());

        // Non-numeric identifier
        let encoded = bs58::encode("wc:abc".as_bytes()).into_string();
        assert!(PaginationCursor::decode(&encoded).is_err());
    }
}
