//! Content checksums.
//!
//! Stored files are reported to clients with a digest so transfers can be
//! verified end to end. SHA-256 is the only algorithm in use.

use sha2::{Digest, Sha256};

/// Label for the algorithm produced by [`sha256_hex`].
pub const SHA256_ALGORITHM: &str = "SHA-256";

/// Hex-encoded SHA-256 digest of the given bytes.
pub fn sha256_hex(payload: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digests_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn digests_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
