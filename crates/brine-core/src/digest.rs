//! Salted digest function.
//!
//! Pure function of (password bytes, salt bytes); no state, no I/O. SHA-512
//! gives a fixed 64-byte output, and salts are the same length as the digest.

use sha2::{Digest, Sha512};

/// Digest output length in bytes (SHA-512).
pub const DIGEST_SIZE: usize = 64;

/// Salt length in bytes. Matches the digest size.
pub const SALT_SIZE: usize = DIGEST_SIZE;

/// Compute the digest of `password ++ salt`.
pub fn salted_digest(password: &[u8], salt: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut hasher = Sha512::new();
    hasher.update(password);
    hasher.update(salt);
    hasher.finalize().into()
}
