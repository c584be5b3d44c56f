//! Store configuration.

use std::time::Duration;

/// Knobs for the store, explicitly constructed and passed in (no process
/// globals).
///
/// Defaults: 5s simulated hashing cost, 30s drain budget at shutdown.
#[derive(Debug, Clone, Copy)]
pub struct StoreConfig {
    /// Artificial delay each worker sleeps before computing its digest,
    /// modeling an expensive hash.
    pub hash_delay: Duration,

    /// How long shutdown waits for in-flight jobs before forcing termination.
    pub shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Override the simulated hashing delay. Tests use short delays so the
    /// suite stays fast.
    pub fn with_hash_delay(mut self, delay: Duration) -> Self {
        self.hash_delay = delay;
        self
    }

    /// Override the shutdown drain budget.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            hash_delay: Duration::from_secs(5),
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = StoreConfig::default();
        assert_eq!(config.hash_delay, Duration::from_secs(5));
        assert_eq!(config.shutdown_timeout, Duration::from_secs(30));
    }

    #[test]
    fn builders_override_fields() {
        let config = StoreConfig::default()
            .with_hash_delay(Duration::from_millis(10))
            .with_shutdown_timeout(Duration::from_millis(20));
        assert_eq!(config.hash_delay, Duration::from_millis(10));
        assert_eq!(config.shutdown_timeout, Duration::from_millis(20));
    }
}
