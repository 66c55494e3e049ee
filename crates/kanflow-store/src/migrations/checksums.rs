//! SHA-256 checksums of migration SQL, recorded in `schema_version`

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of the migration text
pub fn compute_checksum(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_hex_sha256() {
        let checksum = compute_checksum("SELECT 1");
        assert_eq!(checksum.len(), 64);
        assert!(checksum.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_whitespace_changes_checksum() {
        assert_ne!(compute_checksum("SELECT 1"), compute_checksum("SELECT 1 "));
    }
}
