//! Public numeric identifier for stored records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier exposed to API consumers.
///
/// The backing store assigns its own opaque identifiers. Repositories project them
/// into a `RecordId` with a deterministic, lossless mapping, so the store-native type
/// never crosses the repository boundary. The MongoDB gateway maps the 12 bytes of an
/// `ObjectId` big-endian into the low 96 bits; the in-memory gateway uses a counter.
///
/// Serialized as a plain JSON number. Projected MongoDB ids reach ~10^28, beyond the
/// 2^53 integers a JavaScript `number` holds exactly, so JS clients must parse the
/// field as a `BigInt` (or from the raw text) to keep it intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u128);

impl RecordId {
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u128 {
        self.0
    }
}

impl From<u128> for RecordId {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_number() {
        let id = RecordId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }

    #[test]
    fn test_display() {
        assert_eq!(RecordId::from(7u128).to_string(), "7");
    }
}
