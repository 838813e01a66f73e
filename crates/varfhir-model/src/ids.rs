#![deny(unsafe_code)]

use std::fmt;

use uuid::Uuid;

use crate::ModelError;

/// A deterministic resource identifier.
///
/// Wraps the 16 bytes of a content digest and renders them in the canonical
/// hyphenated UUID form. The bytes are used verbatim, so the version and
/// variant nibbles carry digest data rather than RFC 4122 markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StableId(Uuid);

impl StableId {
    pub fn from_digest(digest: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(digest))
    }

    pub fn parse(value: &str) -> Result<Self, ModelError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|source| ModelError::InvalidStableId {
                value: value.to_string(),
                source,
            })
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// The `urn:uuid:` form used for bundle entry URLs and references.
    pub fn urn(&self) -> String {
        format!("urn:uuid:{}", self.0.hyphenated())
    }
}

impl serde::Serialize for StableId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for StableId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_digest_bytes_verbatim() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        let digest = [
            0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04, 0xe9, 0x80, 0x09, 0x98, 0xec, 0xf8,
            0x42, 0x7e,
        ];
        let id = StableId::from_digest(digest);
        assert_eq!(id.to_string(), "d41d8cd9-8f00-b204-e980-0998ecf8427e");
        assert_eq!(id.urn(), "urn:uuid:d41d8cd9-8f00-b204-e980-0998ecf8427e");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(StableId::parse("not-a-uuid").is_err());
        let id = StableId::parse("d41d8cd9-8f00-b204-e980-0998ecf8427e").unwrap();
        assert_eq!(id.as_bytes()[0], 0xd4);
    }
}
