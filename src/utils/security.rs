//! Security Utilities
//!
//! Password credential hashing, verification, and related helpers.
//!
//! Credentials are stored as `saltHex:digestHex` where the digest is
//! SHA-256 over the salt hex concatenated with the password. Accounts
//! created under the older scheme carry a `hashed_<password>` string
//! instead; both shapes are handled at the store boundary through
//! [`PasswordCredential`].

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

/// Salt length in bytes for new credentials
pub const SALT_LEN: usize = 16;

/// Prefix marking a legacy plaintext-derived credential
const LEGACY_PREFIX: &str = "hashed_";

/// A stored password credential, parsed into its shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordCredential {
    /// `saltHex:digestHex` produced by [`hash_password`]
    Salted { salt: String, digest: String },
    /// `hashed_<password>` from the deprecated scheme; holds the full stored string
    LegacyPlain(String),
}

impl PasswordCredential {
    /// Parse a stored credential string into its tagged shape.
    ///
    /// Returns `None` for malformed strings (no separator, empty parts),
    /// which callers must treat as a failed verification rather than an error.
    pub fn parse(stored: &str) -> Option<Self> {
        if stored.starts_with(LEGACY_PREFIX) {
            return Some(Self::LegacyPlain(stored.to_string()));
        }

        let (salt, digest) = stored.split_once(':')?;
        if salt.is_empty() || digest.is_empty() {
            return None;
        }

        Some(Self::Salted {
            salt: salt.to_string(),
            digest: digest.to_string(),
        })
    }

    /// Verify a password against this credential
    pub fn verify(&self, password: &str) -> bool {
        match self {
            Self::Salted { salt, digest } => {
                let computed = digest_hex(salt, password);
                constant_time_compare(&computed, digest)
            }
            Self::LegacyPlain(stored) => {
                let candidate = format!("{}{}", LEGACY_PREFIX, password);
                constant_time_compare(&candidate, stored)
            }
        }
    }
}

/// Hash a password with a fresh random salt, returning `saltHex:digestHex`
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let salt_hex = hex::encode(salt);
    let digest = digest_hex(&salt_hex, password);
    format!("{}:{}", salt_hex, digest)
}

/// Verify a password against a stored credential of either shape.
///
/// Malformed credentials verify as false; this function never errors.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordCredential::parse(stored) {
        Some(credential) => credential.verify(password),
        None => false,
    }
}

fn digest_hex(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Timing-safe string comparison to prevent timing attacks
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (byte_a, byte_b) in a.bytes().zip(b.bytes()) {
        result |= byte_a ^ byte_b;
    }
    result == 0
}
