//! Credential generation and game-server password hashing.
//!
//! The game server stores account passwords as `base64(sha1(password))`, a
//! single unsalted round. Some server builds use a different scheme; adjust
//! [`legacy_password_hash`] when deploying against one of those.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use rand::Rng;
use sha1::{Digest, Sha1};

/// Random bytes behind a generated credential (64 URL-safe characters).
pub const CREDENTIAL_BYTES: usize = 48;

/// A freshly generated credential and its storage hash.
///
/// The plaintext is meant to be shown to the operator once and never stored.
pub struct GeneratedCredential {
    pub plaintext: String,
    pub hash: String,
}

impl std::fmt::Debug for GeneratedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedCredential")
            .field("plaintext", &"<redacted>")
            .field("hash", &self.hash)
            .finish()
    }
}

/// Generate a high-entropy credential plus its game-server hash.
pub fn generate_credential() -> GeneratedCredential {
    let mut bytes = [0u8; CREDENTIAL_BYTES];
    rand::rng().fill(&mut bytes);
    let plaintext = URL_SAFE_NO_PAD.encode(bytes);
    let hash = legacy_password_hash(&plaintext);
    GeneratedCredential { plaintext, hash }
}

/// `base64(sha1(password))` as expected by the game server's `accounts` table.
pub fn legacy_password_hash(password: &str) -> String {
    STANDARD.encode(Sha1::digest(password.as_bytes()))
}
