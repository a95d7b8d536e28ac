//! Opaque pagination cursors.

use crate::{RegistryError, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use wharf_core::CommitId;

/// Length of the integrity marker prefixed to the encoded payload.
const MARKER_LEN: usize = 8;

/// Position within one paginated ancestry listing.
///
/// The cursor pins the anchor commit the listing was started from, so a
/// branch or draft moving between page fetches cannot shift the walk.
/// It is a plain value with no server-side counterpart and can be
/// redeemed by any process or replica that sees the same store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    /// The commit the listing is anchored at.
    pub anchor: CommitId,
    /// Number of ancestry entries already emitted.
    pub offset: u64,
}

impl PageCursor {
    /// Creates a cursor at the start of a listing.
    #[must_use]
    pub fn first(anchor: CommitId) -> Self {
        Self { anchor, offset: 0 }
    }

    /// Returns the cursor advanced by `count` emitted entries.
    #[must_use]
    pub fn advanced(&self, count: u64) -> Self {
        Self {
            anchor: self.anchor,
            offset: self.offset + count,
        }
    }

    /// Encodes the cursor as an opaque URL-safe token.
    ///
    /// The payload is prefixed with a truncated SHA-256 marker. Decoding
    /// verifies the marker, which catches truncated or hand-edited
    /// tokens.
    #[must_use]
    pub fn encode(&self) -> String {
        let payload = serde_json::to_vec(self).expect("cursor serializes to JSON");
        let mut framed = Vec::with_capacity(MARKER_LEN + payload.len());
        framed.extend_from_slice(&marker(&payload));
        framed.extend_from_slice(&payload);
        URL_SAFE_NO_PAD.encode(framed)
    }

    /// Decodes a token back into a cursor.
    pub fn decode(token: &str) -> Result<Self> {
        let framed = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| RegistryError::invalid_page_token("not valid base64"))?;
        if framed.len() <= MARKER_LEN {
            return Err(RegistryError::invalid_page_token("token too short"));
        }
        let (prefix, payload) = framed.split_at(MARKER_LEN);
        if prefix != marker(payload) {
            return Err(RegistryError::invalid_page_token(
                "integrity marker mismatch",
            ));
        }
        serde_json::from_slice(payload)
            .map_err(|_| RegistryError::invalid_page_token("malformed cursor payload"))
    }
}

fn marker(payload: &[u8]) -> [u8; MARKER_LEN] {
    let digest = Sha256::digest(payload);
    let mut out = [0u8; MARKER_LEN];
    out.copy_from_slice(&digest[..MARKER_LEN]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn anchor() -> CommitId {
        CommitId::from_bytes([0xc3; 20])
    }

    #[test]
    fn cursor_roundtrip() {
        let cursor = PageCursor::first(anchor()).advanced(40);
        let token = cursor.encode();
        let decoded = PageCursor::decode(&token).unwrap();
        assert_eq!(decoded, cursor);
        assert_eq!(decoded.offset, 40);
    }

    #[test]
    fn cursor_token_is_opaque() {
        let token = PageCursor::first(anchor()).encode();
        assert!(!token.contains(&anchor().to_hex()));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            PageCursor::decode("not a token!"),
            Err(RegistryError::InvalidPageToken(_))
        ));
        assert!(matches!(
            PageCursor::decode(""),
            Err(RegistryError::InvalidPageToken(_))
        ));
    }

    #[test]
    fn decode_rejects_tampering() {
        let token = PageCursor::first(anchor()).encode();
        let mut bytes = URL_SAFE_NO_PAD.decode(&token).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let tampered = URL_SAFE_NO_PAD.encode(bytes);
        assert!(matches!(
            PageCursor::decode(&tampered),
            Err(RegistryError::InvalidPageToken(_))
        ));
    }

    #[test]
    fn decode_rejects_foreign_payload() {
        let token = URL_SAFE_NO_PAD.encode(b"0123456789abcdef");
        assert!(PageCursor::decode(&token).is_err());
    }

    #[test]
    fn advanced_accumulates() {
        let cursor = PageCursor::first(anchor()).advanced(10).advanced(5);
        assert_eq!(cursor.offset, 15);
        assert_eq!(cursor.anchor, anchor());
    }
}
