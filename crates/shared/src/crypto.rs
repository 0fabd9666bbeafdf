//! Cryptographic utilities for staff API key hashing.

use sha2::{Digest, Sha256};

/// Prefix carried by every staff API key.
pub const API_KEY_PREFIX: &str = "sisf_";

/// Number of characters after [`API_KEY_PREFIX`] kept as the visible key prefix.
const VISIBLE_PREFIX_LEN: usize = 8;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extracts the visible prefix from an API key (first 8 characters after "sisf_").
pub fn extract_key_prefix(key: &str) -> Option<&str> {
    let rest = key.strip_prefix(API_KEY_PREFIX)?;
    rest.get(..VISIBLE_PREFIX_LEN)
}

/// Returns `true` when the key has the expected shape and minimum length.
pub fn is_well_formed_key(key: &str) -> bool {
    extract_key_prefix(key).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let hash = sha256_hex("test");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_empty_string() {
        let hash = sha256_hex("");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        assert_eq!(sha256_hex("same_input"), sha256_hex("same_input"));
        assert_ne!(sha256_hex("input1"), sha256_hex("input2"));
    }

    #[test]
    fn test_extract_key_prefix() {
        assert_eq!(extract_key_prefix("sisf_abcdefgh12345"), Some("abcdefgh"));
        assert_eq!(extract_key_prefix("sisf_12345678"), Some("12345678"));
        assert_eq!(extract_key_prefix("sisf_short"), None);
        assert_eq!(extract_key_prefix("pm_abcdefgh12345"), None);
        assert_eq!(extract_key_prefix("SISF_abcdefgh12345"), None);
        assert_eq!(extract_key_prefix(""), None);
    }

    #[test]
    fn test_extract_key_prefix_multibyte_does_not_panic() {
        // 8 bytes would split the first multibyte character
        assert_eq!(extract_key_prefix("sisf_aéééé"), None);
    }

    #[test]
    fn test_is_well_formed_key() {
        assert!(is_well_formed_key("sisf_admin1234567"));
        assert!(!is_well_formed_key("sisf_"));
        assert!(!is_well_formed_key("not-a-key"));
    }
}
