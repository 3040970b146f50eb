//! SHA-256 digests rendered as lowercase hex

use sha2::{Digest, Sha256};

use super::canonical::{canonicalize, Node};

/// Length of a digest in hex characters
pub const DIGEST_HEX_LEN: usize = 64;

/// Hash the UTF-8 bytes of `text`
pub fn hash_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Canonicalize `value` and hash the result
pub fn hash_canonical(value: &Node) -> String {
    hash_hex(&canonicalize(value))
}

/// Whether `s` has the shape of a digest produced by this module
pub fn is_digest(s: &str) -> bool {
    s.len() == DIGEST_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            hash_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hash_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_shape_and_determinism() {
        for input in ["", "stable-canvas-v1", "данни", "{\"a\":1}"] {
            let first = hash_hex(input);
            assert_eq!(first, hash_hex(input));
            assert!(is_digest(&first), "bad digest for {:?}: {}", input, first);
        }
    }

    #[test]
    fn test_is_digest_rejects_uppercase_and_short() {
        assert!(!is_digest("ABC"));
        assert!(!is_digest(&"A".repeat(64)));
        assert!(is_digest(&"a".repeat(64)));
    }
}
