//! SaltSource port - 乱数ソースの抽象化
//!
//! Workers draw their salt through this trait so the entropy-failure path is
//! testable. Production uses the OS CSPRNG; tests can substitute a source
//! that refuses to produce bytes.

use rand::RngCore;
use rand::rngs::OsRng;

use crate::domain::StoreError;

/// Source of cryptographically random salt bytes.
///
/// # Thread safety
/// `Send + Sync` so a single source can be shared across workers.
pub trait SaltSource: Send + Sync {
    /// Fill `buf` with random bytes, or report why the entropy source could
    /// not. A failed fill must never leave weak randomness behind for the
    /// caller to use.
    fn fill(&self, buf: &mut [u8]) -> Result<(), StoreError>;
}

/// OS CSPRNG-backed salt source (production default).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSalt;

impl SaltSource for OsSalt {
    fn fill(&self, buf: &mut [u8]) -> Result<(), StoreError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| StoreError::EntropyFailure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::SALT_SIZE;

    #[test]
    fn os_salt_fills_requested_length() {
        let mut buf = vec![0u8; SALT_SIZE];
        OsSalt.fill(&mut buf).unwrap();
        assert_eq!(buf.len(), SALT_SIZE);
    }

    #[test]
    fn consecutive_salts_differ() {
        let mut a = vec![0u8; SALT_SIZE];
        let mut b = vec![0u8; SALT_SIZE];
        OsSalt.fill(&mut a).unwrap();
        OsSalt.fill(&mut b).unwrap();
        // 2^-512 collision chance; a failure here means the source is broken.
        assert_ne!(a, b);
    }
}
