//! Access-token generation and hashing.
//!
//! Plain tokens are handed to the client once and only their SHA-256 hash
//! is stored, so a leaked table cannot be replayed against the API.

use std::fmt;

use rand::Rng;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Default token length in characters.
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// A plain token that must not end up in logs.
///
/// `Debug` and `Display` print `[REDACTED]`; serialization exposes the
/// value so it can be returned to the client that requested it.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// Generates an alphanumeric token of `length` characters.
pub fn generate_token(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}

pub fn generate_token_default() -> String {
    generate_token(DEFAULT_TOKEN_LENGTH)
}

/// Hex-encoded SHA-256 of a token, used as its storage key.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(digest)
}
