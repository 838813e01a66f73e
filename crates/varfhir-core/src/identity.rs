//! Deterministic identifiers.
//!
//! Every identifier in a report is a 128-bit MD5 digest of some seed
//! material, rendered as a UUID. Nothing is random: the same material always
//! yields the same [`StableId`], which is what makes re-runs over the same
//! dataset reproduce their output.

use md5::{Digest, Md5};
use varfhir_model::StableId;

/// Derive a stable identifier from arbitrary seed material.
pub fn make_id(seed_material: &str) -> StableId {
    let digest: [u8; 16] = Md5::digest(seed_material.as_bytes()).into();
    StableId::from_digest(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digests() {
        assert_eq!(
            make_id("").to_string(),
            "d41d8cd9-8f00-b204-e980-0998ecf8427e"
        );
        assert_eq!(
            make_id("abc").to_string(),
            "90015098-3cd2-4fb0-d696-3f7d28e17f72"
        );
    }

    #[test]
    fn same_input_same_id() {
        assert_eq!(make_id("seedval + S1"), make_id("seedval + S1"));
        assert_ne!(make_id("seedval + S1"), make_id("seedval + S2"));
    }
}
