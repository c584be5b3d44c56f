//! Store module: the job table manager and its programmatic contract.

mod memory;

pub use memory::HashStore;

use std::time::Duration;

use async_trait::async_trait;

use crate::digest::DIGEST_SIZE;
use crate::domain::{JobId, StatsSnapshot, StoreCounts, StoreError};

/// The contract the request-handling layer consumes.
///
/// Design intent:
/// - The store is the single serialization point for all shared state.
/// - Callers never coordinate among themselves; every operation is safe to
///   issue concurrently from any number of tasks.
/// - The in-memory `HashStore` is the only implementation today; the trait is
///   the seam for swapping one in later.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Accept a password for hashing. Allocates the next id synchronously
    /// (never blocks on hashing) and kicks off a background worker. Rejected
    /// with `ShuttingDown` once draining has begun.
    async fn submit(&self, password: &[u8]) -> Result<JobId, StoreError>;

    /// Fetch the digest for `id`.
    ///
    /// Unknown ids fail fast with `NotFound`. A known-but-Pending record is
    /// waited on for up to `timeout`, then `Timeout` (the job itself keeps
    /// running). Permanently failed jobs return `JobFailed`.
    async fn get_hash(&self, id: JobId, timeout: Duration)
    -> Result<[u8; DIGEST_SIZE], StoreError>;

    /// Recompute the digest of `candidate` with the stored salt and compare.
    /// False for unknown, still-pending, or failed records; no waiting.
    async fn check_password(&self, id: JobId, candidate: &[u8]) -> bool;

    /// Race-free copy of `{completed count, average compute duration}`.
    async fn stats(&self) -> StatsSnapshot;

    /// Observability hook: counts by record state plus in-flight work.
    async fn counts(&self) -> StoreCounts;

    /// Stop intake and wait for in-flight jobs up to `timeout`.
    ///
    /// Clean drain returns `Ok`. If the budget elapses with work still in
    /// flight, the store is stopped anyway and `ShutdownForced` reports how
    /// many jobs were abandoned.
    async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError>;
}
