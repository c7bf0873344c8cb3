//! Content fingerprints

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `content`.
pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::sha256_hex;

    #[test]
    fn sha256_hex_matches_known_digest() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_hex_changes_with_single_byte() {
        assert_ne!(sha256_hex(b"target: all\n"), sha256_hex(b"target: all \n"));
        assert_eq!(sha256_hex(b"abc").len(), 64);
    }
}
