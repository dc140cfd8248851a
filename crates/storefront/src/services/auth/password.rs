//! Password digests.
//!
//! New digests are always lowercase hex SHA-256. Older versions of the page
//! fell back to storing the base64 encoding of the password when no digest
//! primitive was available; those values are only honored when legacy
//! acceptance is switched on, and callers are expected to replace them with a
//! real digest after a successful match.

use base64::{Engine, engine::general_purpose::STANDARD};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use vitrine_core::PasswordDigest;

/// Outcome of checking a password against a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The SHA-256 digest matches.
    Match,
    /// The stored value is the legacy base64 encoding of this password.
    LegacyMatch,
    /// No match.
    Mismatch,
}

/// SHA-256 digest of `password`, hex encoded.
#[must_use]
pub fn digest(password: &SecretString) -> PasswordDigest {
    let hash = Sha256::digest(password.expose_secret().as_bytes());
    PasswordDigest::new(hex::encode(hash))
}

/// Check `password` against `stored`.
#[must_use]
pub fn verify(password: &SecretString, stored: &PasswordDigest, accept_legacy: bool) -> Verification {
    if constant_time_compare(digest(password).as_str(), stored.as_str()) {
        return Verification::Match;
    }

    if accept_legacy && !stored.is_sha256_hex() {
        let encoded = STANDARD.encode(password.expose_secret().as_bytes());
        if constant_time_compare(&encoded, stored.as_str()) {
            return Verification::LegacyMatch;
        }
    }

    Verification::Mismatch
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[test]
    fn test_digest_is_sha256_hex() {
        assert_eq!(
            digest(&secret("abc")).as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify_digest() {
        let stored = digest(&secret("senha123"));
        assert_eq!(verify(&secret("senha123"), &stored, false), Verification::Match);
        assert_eq!(verify(&secret("senha124"), &stored, true), Verification::Mismatch);
    }

    #[test]
    fn test_legacy_encoding_needs_opt_in() {
        let stored = PasswordDigest::new("c2VuaGExMjM=".to_string());
        assert_eq!(verify(&secret("senha123"), &stored, false), Verification::Mismatch);
        assert_eq!(verify(&secret("senha123"), &stored, true), Verification::LegacyMatch);
        assert_eq!(verify(&secret("senha999"), &stored, true), Verification::Mismatch);
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc", "abc"));
        assert!(!constant_time_compare("abc", "abd"));
        assert!(!constant_time_compare("abc", "ab"));
    }
}
