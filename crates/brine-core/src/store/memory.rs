//! In-memory store manager.

use std::collections::BTreeMap;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};
use tracing::{debug, error, info, warn};

use super::JobStore;
use crate::config::StoreConfig;
use crate::digest::{DIGEST_SIZE, salted_digest};
use crate::domain::{
    HashRecord, JobId, RecordState, RunningStats, StatsSnapshot, StoreCounts, StoreError,
    StorePhase,
};
use crate::salt::{OsSalt, SaltSource};
use crate::worker;

/// Exclusively-owned shared state. No component outside this module reads or
/// writes it directly.
struct StoreState {
    /// All hash records (single source of truth). BTreeMap keeps iteration in
    /// id order, which is also insertion order.
    records: BTreeMap<JobId, HashRecord>,

    /// Next job id to assign.
    next_job_id: u64,

    /// Running stats, fed only from inside the serialized section.
    stats: RunningStats,

    /// Submissions whose completion report has not yet been applied.
    in_flight: usize,

    /// Shutdown state machine.
    phase: StorePhase,
}

impl StoreState {
    fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_job_id: 1,
            stats: RunningStats::new(),
            in_flight: 0,
            phase: StorePhase::Running,
        }
    }

    /// Allocate a new JobId. Strictly increasing, acceptance order.
    fn allocate_job_id(&mut self) -> JobId {
        let id = JobId::new(self.next_job_id);
        self.next_job_id += 1;
        id
    }

    /// Counts by record state, for observability.
    fn counts(&self) -> StoreCounts {
        let mut counts = StoreCounts::default();
        for record in self.records.values() {
            match record.state() {
                RecordState::Pending => counts.pending += 1,
                RecordState::Ready => counts.ready += 1,
                RecordState::Failed => counts.failed += 1,
            }
        }
        counts.in_flight = self.in_flight;
        counts
    }
}

/// In-memory store manager.
///
/// All mutation goes through one `Mutex<StoreState>`, held only for short
/// read/write sections and never across a sleep or a wait. Callers that need
/// to wait for a record park on `ready` outside the critical section; the
/// drain path parks on `drained`.
pub struct HashStore {
    state: Arc<Mutex<StoreState>>,
    /// Notified after every applied completion or failure.
    ready: Arc<Notify>,
    /// Notified when in-flight work reaches zero.
    drained: Arc<Notify>,
    salt_source: Arc<dyn SaltSource>,
    config: StoreConfig,
}

impl Clone for HashStore {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            ready: Arc::clone(&self.ready),
            drained: Arc::clone(&self.drained),
            salt_source: Arc::clone(&self.salt_source),
            config: self.config,
        }
    }
}

impl HashStore {
    pub fn new(config: StoreConfig) -> Self {
        Self::with_salt_source(config, Arc::new(OsSalt))
    }

    /// Construct with a custom salt source (tests exercise the entropy
    /// failure path through this).
    pub fn with_salt_source(config: StoreConfig, salt_source: Arc<dyn SaltSource>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::new())),
            ready: Arc::new(Notify::new()),
            drained: Arc::new(Notify::new()),
            salt_source,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub(crate) fn salt_source(&self) -> &Arc<dyn SaltSource> {
        &self.salt_source
    }

    /// Apply a worker's completion report. Worker-only; called exactly once
    /// per submission.
    pub(crate) async fn apply_completion(
        &self,
        id: JobId,
        salt: Vec<u8>,
        digest: [u8; DIGEST_SIZE],
        elapsed: Duration,
    ) -> Result<(), StoreError> {
        let drained = {
            let mut state = self.state.lock().await;
            if state.phase == StorePhase::Stopped {
                // the job was already reported to the operator as abandoned
                warn!(%id, "completion report after forced stop; dropping");
                return Err(StoreError::ShuttingDown);
            }
            let Some(record) = state.records.get_mut(&id) else {
                warn!(%id, "completion report for unknown job");
                return Err(StoreError::NotFound(id));
            };
            if !record.mark_ready(salt, digest) {
                warn!(%id, "duplicate completion report; first result stands");
                return Err(StoreError::DuplicateCompletion(id));
            }
            state.stats.record(elapsed);
            state.in_flight -= 1;
            debug!(%id, ?elapsed, in_flight = state.in_flight, "completion applied");
            state.in_flight == 0
        };

        // notify outside the lock
        self.ready.notify_waiters();
        if drained {
            self.drained.notify_waiters();
        }
        Ok(())
    }

    /// Record a permanent per-job failure (entropy exhaustion). Worker-only.
    /// The record never becomes Ready; the manager stays alive.
    pub(crate) async fn mark_failed(&self, id: JobId, reason: &str) -> Result<(), StoreError> {
        let drained = {
            let mut state = self.state.lock().await;
            if state.phase == StorePhase::Stopped {
                warn!(%id, "failure report after forced stop; dropping");
                return Err(StoreError::ShuttingDown);
            }
            let Some(record) = state.records.get_mut(&id) else {
                warn!(%id, "failure report for unknown job");
                return Err(StoreError::NotFound(id));
            };
            if !record.mark_failed() {
                warn!(%id, "failure report for a job that already completed");
                return Err(StoreError::DuplicateCompletion(id));
            }
            state.in_flight -= 1;
            error!(%id, reason, "job failed permanently");
            state.in_flight == 0
        };

        self.ready.notify_waiters();
        if drained {
            self.drained.notify_waiters();
        }
        Ok(())
    }
}

#[async_trait]
impl JobStore for HashStore {
    async fn submit(&self, password: &[u8]) -> Result<JobId, StoreError> {
        let id = {
            let mut state = self.state.lock().await;
            if !state.phase.accepts_submissions() {
                return Err(StoreError::ShuttingDown);
            }
            let id = state.allocate_job_id();
            state.records.insert(id, HashRecord::new());
            state.in_flight += 1;
            id
        };
        debug!(%id, "hash job accepted");

        // the worker runs fully in parallel and only re-enters the store for
        // its one completion report
        tokio::spawn(worker::run_hash_job(self.clone(), id, password.to_vec()));
        Ok(id)
    }

    async fn get_hash(
        &self,
        id: JobId,
        timeout: Duration,
    ) -> Result<[u8; DIGEST_SIZE], StoreError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            // Register interest before checking state so a completion applied
            // between unlock and await still wakes us.
            let mut ready = pin!(self.ready.notified());
            ready.as_mut().enable();

            {
                let state = self.state.lock().await;
                match state.records.get(&id) {
                    None => return Err(StoreError::NotFound(id)),
                    Some(record) => match record.state() {
                        RecordState::Ready => {
                            let digest =
                                record.digest().expect("digest is set when record is Ready");
                            return Ok(*digest);
                        }
                        RecordState::Failed => return Err(StoreError::JobFailed(id)),
                        RecordState::Pending => {}
                    },
                }
            }

            // wait outside the lock, bounded by the caller's budget
            if tokio::time::timeout_at(deadline, ready).await.is_err() {
                return Err(StoreError::Timeout(id));
            }
        }
    }

    async fn check_password(&self, id: JobId, candidate: &[u8]) -> bool {
        let (salt, expected) = {
            let state = self.state.lock().await;
            match state.records.get(&id) {
                Some(record) if record.state() == RecordState::Ready => (
                    record.salt().to_vec(),
                    *record.digest().expect("digest is set when record is Ready"),
                ),
                // unknown, pending, or failed: no match, no waiting
                _ => return false,
            }
        };

        // recompute outside the critical section
        salted_digest(candidate, &salt) == expected
    }

    async fn stats(&self) -> StatsSnapshot {
        let state = self.state.lock().await;
        state.stats.snapshot()
    }

    async fn counts(&self) -> StoreCounts {
        let state = self.state.lock().await;
        state.counts()
    }

    async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        {
            let mut state = self.state.lock().await;
            match state.phase {
                StorePhase::Running => {
                    state.phase = StorePhase::Draining;
                    info!(in_flight = state.in_flight, "draining; intake stopped");
                }
                StorePhase::Draining => {}
                StorePhase::Stopped => return Ok(()),
            }
        }

        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let mut drained = pin!(self.drained.notified());
            drained.as_mut().enable();

            {
                let mut state = self.state.lock().await;
                if state.in_flight == 0 {
                    state.phase = StorePhase::Stopped;
                    info!("stopped cleanly");
                    return Ok(());
                }
            }

            if tokio::time::timeout_at(deadline, drained).await.is_err() {
                let mut state = self.state.lock().await;
                // a completion may have slipped in right at the deadline
                if state.in_flight == 0 {
                    state.phase = StorePhase::Stopped;
                    info!("stopped cleanly");
                    return Ok(());
                }
                let pending = state.in_flight;
                state.phase = StorePhase::Stopped;
                error!(pending, "drain timeout elapsed; shutdown forced");
                return Err(StoreError::ShutdownForced { pending });
            }
        }
    }
}
