//! Error kinds returned by store operations.
//!
//! Per-operation errors go back to the immediate caller and never crash the
//! manager. Only entropy exhaustion abandons a job, and only that one job.

use thiserror::Error;

use super::ids::JobId;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The id was never allocated. Returned immediately, never retried.
    #[error("{0} not found")]
    NotFound(JobId),

    /// The record exists but did not become Ready within the caller's budget.
    /// The underlying job keeps running; the caller may retry with a new
    /// timeout.
    #[error("{0} not ready within timeout")]
    Timeout(JobId),

    /// Submission attempted while draining or after stop.
    #[error("store is shutting down")]
    ShuttingDown,

    /// The job failed permanently and will never become Ready.
    #[error("{0} failed permanently")]
    JobFailed(JobId),

    /// Salt generation failed inside a worker.
    #[error("entropy source failed: {0}")]
    EntropyFailure(String),

    /// A worker reported completion for a job that already left Pending.
    /// Contract violation; the first result stands.
    #[error("duplicate completion report for {0}")]
    DuplicateCompletion(JobId),

    /// Drain timeout elapsed with work still in flight; shutdown was forced
    /// and the remaining jobs abandoned.
    #[error("shutdown forced with {pending} job(s) still in flight")]
    ShutdownForced { pending: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_job() {
        let msg = StoreError::NotFound(JobId::new(9)).to_string();
        assert!(msg.contains("job-9"));

        let msg = StoreError::DuplicateCompletion(JobId::new(3)).to_string();
        assert!(msg.contains("job-3"));
    }

    #[test]
    fn forced_shutdown_reports_pending_count() {
        let msg = StoreError::ShutdownForced { pending: 4 }.to_string();
        assert!(msg.contains('4'));
    }
}
