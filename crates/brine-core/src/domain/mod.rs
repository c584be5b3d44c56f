//! Domain model (IDs, records, states, stats, errors).

pub mod errors;
pub mod ids;
pub mod record;
pub mod state;
pub mod stats;

pub use errors::StoreError;
pub use ids::JobId;
pub use record::HashRecord;
pub use state::{RecordState, StorePhase};
pub use stats::{RunningStats, StatsSnapshot, StoreCounts};
