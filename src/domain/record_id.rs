//! Record key for stored documents.
//!
//! [`RecordId`] is a 12-byte key rendered as 24 hexadecimal characters. It
//! follows the document-database object id layout: a 4-byte big-endian
//! timestamp in seconds, a 5-byte random value chosen once per process, and
//! a 3-byte counter. The counter starts below `0x01_0000`, so keys minted
//! by one process sort in creation order until it wraps after roughly
//! sixteen million keys.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of raw bytes in a record key.
pub const RECORD_ID_BYTES: usize = 12;

/// Length of the hexadecimal wire form of a record key.
pub const RECORD_ID_HEX_LEN: usize = RECORD_ID_BYTES * 2;

const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// Unique key of a stored record.
///
/// Assigned by the storage layer on insert and immutable afterwards.
/// Clients only ever see the hexadecimal form; anything that does not
/// pass [`RecordId::is_valid`] is rejected before reaching storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId([u8; RECORD_ID_BYTES]);

/// Error returned when a string is not a well-formed record key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed record key: {0:?}")]
pub struct ParseRecordIdError(pub String);

struct ProcessSeed {
    random: [u8; 5],
    counter: AtomicU32,
}

fn process_seed() -> &'static ProcessSeed {
    static SEED: OnceLock<ProcessSeed> = OnceLock::new();
    SEED.get_or_init(|| {
        let [r0, r1, r2, r3, r4, c0, c1, ..] = uuid::Uuid::new_v4().into_bytes();
        ProcessSeed {
            random: [r0, r1, r2, r3, r4],
            counter: AtomicU32::new(u32::from_be_bytes([0, 0, c0, c1])),
        }
    })
}

impl RecordId {
    /// Mints a fresh key from the current time, the process random value
    /// and the next counter value.
    #[must_use]
    pub fn new() -> Self {
        let seed = process_seed();
        let secs = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let count = seed.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let [t0, t1, t2, t3] = secs.to_be_bytes();
        let [r0, r1, r2, r3, r4] = seed.random;
        let [_, c0, c1, c2] = count.to_be_bytes();
        Self([t0, t1, t2, t3, r0, r1, r2, r3, r4, c0, c1, c2])
    }

    /// Builds a key from its raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; RECORD_ID_BYTES]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes of the key.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RECORD_ID_BYTES] {
        &self.0
    }

    /// Returns `true` if `s` is a structurally valid key: exactly
    /// 24 ASCII hex digits, in either case.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        s.len() == RECORD_ID_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

/// Free-function form of [`RecordId::is_valid`].
#[must_use]
pub fn is_valid_id(s: &str) -> bool {
    RecordId::is_valid(s)
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

fn nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

impl FromStr for RecordId {
    type Err = ParseRecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !Self::is_valid(s) {
            return Err(ParseRecordIdError(s.to_string()));
        }
        let mut bytes = [0u8; RECORD_ID_BYTES];
        for (dst, pair) in bytes.iter_mut().zip(s.as_bytes().chunks_exact(2)) {
            let (Some(&hi), Some(&lo)) = (pair.first(), pair.get(1)) else {
                return Err(ParseRecordIdError(s.to_string()));
            };
            match (nibble(hi), nibble(lo)) {
                (Some(hi), Some(lo)) => *dst = (hi << 4) | lo,
                _ => return Err(ParseRecordIdError(s.to_string())),
            }
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        let a = RecordId::new();
        let b = RecordId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn sequential_keys_sort_in_creation_order() {
        let ids: Vec<RecordId> = (0..1_000).map(|_| RecordId::new()).collect();
        assert!(ids.windows(2).all(|pair| matches!(pair, [a, b] if a < b)));
    }

    #[test]
    fn counter_starts_far_from_wrapping() {
        let [.., c0, c1, c2] = *RecordId::new().as_bytes();
        let count = u32::from_be_bytes([0, c0, c1, c2]);
        assert!(count < COUNTER_MASK / 2);
    }

    #[test]
    fn display_is_24_lowercase_hex() {
        let s = RecordId::new().to_string();
        assert_eq!(s.len(), RECORD_ID_HEX_LEN);
        assert!(s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
        assert!(is_valid_id(&s));
    }

    #[test]
    fn validator_rejects_malformed_keys() {
        assert!(!is_valid_id("abc12"));
        assert!(!is_valid_id("abc123"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("5a0b1c2d3e4f5a6b7c8d9e0"));
        assert!(!is_valid_id("5a0b1c2d3e4f5a6b7c8d9e0f1"));
        assert!(!is_valid_id("5a0b1c2d3e4f5a6b7c8d9e0z"));
        assert!(!is_valid_id("5a0b1c2d-e4f5a6b7c8d9e0f"));
    }

    #[test]
    fn validator_accepts_either_case() {
        assert!(is_valid_id("5a0b1c2d3e4f5a6b7c8d9e0f"));
        assert!(is_valid_id("5A0B1C2D3E4F5A6B7C8D9E0F"));
    }

    #[test]
    fn parse_normalizes_to_lowercase() {
        let Ok(id) = "5A0B1C2D3E4F5A6B7C8D9E0F".parse::<RecordId>() else {
            panic!("valid key rejected");
        };
        assert_eq!(id.to_string(), "5a0b1c2d3e4f5a6b7c8d9e0f");
        assert_eq!(
            id.as_bytes(),
            &[0x5a, 0x0b, 0x1c, 0x2d, 0x3e, 0x4f, 0x5a, 0x6b, 0x7c, 0x8d, 0x9e, 0x0f]
        );
    }

    #[test]
    fn parse_rejects_malformed_key() {
        let result = "not-a-key".parse::<RecordId>();
        assert_eq!(result, Err(ParseRecordIdError("not-a-key".to_string())));
    }

    #[test]
    fn leading_bytes_carry_creation_time() {
        let before = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let id = RecordId::new();
        let [t0, t1, t2, t3, ..] = *id.as_bytes();
        let secs = u32::from_be_bytes([t0, t1, t2, t3]);
        assert!(secs >= before);
        assert!(secs <= before + 5);
    }

    #[test]
    fn serializes_as_hex_string() {
        let id = RecordId::from_bytes([0xab; RECORD_ID_BYTES]);
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"abababababababababababab\""));
    }

    #[test]
    fn deserialize_rejects_malformed_string() {
        let parsed: Result<RecordId, _> = serde_json::from_str("\"abc123\"");
        assert!(parsed.is_err());
    }
}
