//! Hash worker: one background task per submission.

use std::time::Instant;

use tracing::warn;

use crate::digest::{SALT_SIZE, salted_digest};
use crate::domain::JobId;
use crate::store::HashStore;

/// Compute one salted digest off the manager's critical path and report it
/// back exactly once.
///
/// The worker owns its salt/password/digest values until the handoff; it
/// holds no shared lock during the simulated delay or the digest computation.
/// Entropy failure is fatal for this job only; the record is marked failed
/// rather than left with weak randomness.
pub(crate) async fn run_hash_job(store: HashStore, id: JobId, password: Vec<u8>) {
    let started = Instant::now();

    let mut salt = vec![0u8; SALT_SIZE];
    if let Err(e) = store.salt_source().fill(&mut salt) {
        if let Err(report_err) = store.mark_failed(id, &e.to_string()).await {
            warn!(%id, error = %report_err, "failure report rejected");
        }
        return;
    }

    // simulated cost of the real hashing work; counted into compute time
    tokio::time::sleep(store.config().hash_delay).await;

    let digest = salted_digest(&password, &salt);
    let elapsed = started.elapsed();

    // 失敗しても worker は落とさない（store 側が warn 済み）
    if let Err(e) = store.apply_completion(id, salt, digest, elapsed).await {
        warn!(%id, error = %e, "completion report rejected");
    }
}
