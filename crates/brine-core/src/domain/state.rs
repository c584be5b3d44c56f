//! Record and store state machines.

use serde::{Deserialize, Serialize};

/// State of a single hash record.
///
/// State transitions:
/// - Pending -> Ready (worker reported its digest, applied by the manager)
/// - Pending -> Failed (worker could not draw salt; the record never becomes Ready)
///
/// The transition happens exactly once; a record is created Pending and only
/// the manager moves it forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordState {
    /// Submitted, digest not yet computed.
    Pending,

    /// Digest computed and stored.
    Ready,

    /// Permanently failed (entropy exhaustion in the worker).
    Failed,
}

impl RecordState {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, RecordState::Ready | RecordState::Failed)
    }
}

/// Store-wide lifecycle phase.
///
/// - Running: submissions accepted, queries served.
/// - Draining: submissions rejected, queries still served, workers finishing.
/// - Stopped: drain completed (or was forced); nothing new is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorePhase {
    Running,
    Draining,
    Stopped,
}

impl StorePhase {
    /// Can new submissions be accepted in this phase?
    pub fn accepts_submissions(self) -> bool {
        matches!(self, StorePhase::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::pending(RecordState::Pending, false)]
    #[case::ready(RecordState::Ready, true)]
    #[case::failed(RecordState::Failed, true)]
    fn terminal_states(#[case] state: RecordState, #[case] terminal: bool) {
        assert_eq!(state.is_terminal(), terminal);
    }

    #[rstest]
    #[case::running(StorePhase::Running, true)]
    #[case::draining(StorePhase::Draining, false)]
    #[case::stopped(StorePhase::Stopped, false)]
    fn only_running_accepts_submissions(#[case] phase: StorePhase, #[case] accepts: bool) {
        assert_eq!(phase.accepts_submissions(), accepts);
    }
}
