//! Running statistics over completed hash jobs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Incrementally maintained mean compute duration, O(1) memory regardless of
/// job count.
///
/// On each completion with duration `d`:
/// `count += 1; average += (d - average) / count`.
///
/// The update is done in f64 seconds; integer Duration division truncates
/// enough to drift outside the 1ms tolerance over many samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningStats {
    completed: u64,
    average: Duration,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completions applied so far. Only ever increases.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn average(&self) -> Duration {
        self.average
    }

    /// Fold one completion duration into the mean.
    pub fn record(&mut self, duration: Duration) {
        self.completed += 1;
        let avg = self.average.as_secs_f64();
        let delta = duration.as_secs_f64() - avg;
        self.average = Duration::from_secs_f64(avg + delta / self.completed as f64);
    }

    /// Immutable copy for callers; never aliases live state.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total: self.completed,
            average: self.average,
        }
    }
}

/// A consistent, race-free copy of the aggregate statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Completed job count.
    pub total: u64,

    /// Mean compute duration over completed jobs.
    pub average: Duration,
}

impl StatsSnapshot {
    /// Average in whole milliseconds, the unit the API layer reports.
    pub fn average_millis(&self) -> u64 {
        self.average.as_millis() as u64
    }
}

/// Counts by record state, for observability.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StoreCounts {
    pub pending: usize,
    pub ready: usize,
    pub failed: usize,

    /// Submissions whose completion report has not yet been applied.
    pub in_flight: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats_report_zero() {
        let stats = RunningStats::new();
        let snap = stats.snapshot();
        assert_eq!(snap.total, 0);
        assert_eq!(snap.average, Duration::ZERO);
    }

    #[test]
    fn single_sample_is_its_own_average() {
        let mut stats = RunningStats::new();
        stats.record(Duration::from_millis(250));

        let snap = stats.snapshot();
        assert_eq!(snap.total, 1);
        assert_eq!(snap.average_millis(), 250);
    }

    #[test]
    fn incremental_mean_matches_arithmetic_mean() {
        // Durations chosen so the true mean is not representable exactly in
        // integer milliseconds per-step; the incremental update must still
        // land within tolerance.
        let samples: Vec<Duration> = (1..=100)
            .map(|i| Duration::from_millis(i * 7 % 400 + 3))
            .collect();

        let mut stats = RunningStats::new();
        for d in &samples {
            stats.record(*d);
        }

        let sum: Duration = samples.iter().sum();
        let expected = sum / samples.len() as u32;
        let got = stats.snapshot().average;

        let diff = if got > expected {
            got - expected
        } else {
            expected - got
        };
        assert!(diff < Duration::from_millis(1), "off by {diff:?}");
        assert_eq!(stats.completed(), 100);
    }

    #[test]
    fn count_only_increases() {
        let mut stats = RunningStats::new();
        stats.record(Duration::from_millis(5));
        stats.record(Duration::from_millis(1));
        stats.record(Duration::from_millis(9));
        assert_eq!(stats.completed(), 3);
    }
}
