//! Password credential types.
//!
//! Only digests are ever stored; the plaintext never reaches this crate.

use serde::{Deserialize, Serialize};

/// Stored password value: a lowercase hex SHA-256 digest.
///
/// Accounts written by older versions of the page may hold the base64
/// encoding of the password instead. The value is kept opaque here; the
/// storefront's auth service decides how to verify and upgrade it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Length of a hex-encoded SHA-256 digest.
    pub const HEX_LEN: usize = 64;

    /// Wrap an already computed digest.
    #[must_use]
    pub const fn new(digest: String) -> Self {
        Self(digest)
    }

    /// Get the digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the stored value has the shape of a hex SHA-256 digest.
    #[must_use]
    pub fn is_sha256_hex(&self) -> bool {
        self.0.len() == Self::HEX_LEN && self.0.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl AsRef<str> for PasswordDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for PasswordDigest {
    fn from(digest: String) -> Self {
        Self(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sha256_hex() {
        let digest = PasswordDigest::new("a".repeat(64));
        assert!(digest.is_sha256_hex());

        let legacy = PasswordDigest::new("c2VuaGExMjM=".to_string());
        assert!(!legacy.is_sha256_hex());
    }
}
