//! Domain identifiers.
//!
//! Job ids are plain sequential integers, allocated by the store manager in
//! submission-acceptance order. Two submissions accepted at T1 < T2 always
//! get id1 < id2, with no duplicates and no gaps. The newtype keeps them from
//! being confused with other integers at the API boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a hash job (submit/query unit).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(u64);

impl JobId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for JobId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_job_prefix() {
        assert_eq!(JobId::new(42).to_string(), "job-42");
    }

    #[test]
    fn ids_order_by_value() {
        assert!(JobId::new(1) < JobId::new(2));
        assert!(JobId::new(2) < JobId::new(10));
    }

    #[test]
    fn serializes_as_bare_integer() {
        let s = serde_json::to_string(&JobId::new(7)).unwrap();
        assert_eq!(s, "7");

        let back: JobId = serde_json::from_str("7").unwrap();
        assert_eq!(back, JobId::new(7));
    }
}
