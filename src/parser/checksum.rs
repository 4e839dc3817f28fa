//! Content checksums used as audit cache keys

use sha2::{Digest, Sha256};

/// Calculate SHA256 checksum of raw content
///
/// Nothing is normalized: tabs and length feed the finding.
pub fn content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_format() {
        let checksum = content_checksum("# Canon");
        assert!(checksum.starts_with("sha256:"));
        assert_eq!(checksum.len(), "sha256:".len() + 64);
    }

    #[test]
    fn test_checksum_is_whitespace_sensitive() {
        assert_ne!(content_checksum("a\tb"), content_checksum("a    b"));
        assert_ne!(content_checksum("a"), content_checksum("a\n"));
        assert_eq!(content_checksum("same"), content_checksum("same"));
    }
}
