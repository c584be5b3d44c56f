//! brine-core
//!
//! Core building blocks for the brine hash-job store.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, record, state, stats, errors）
//! - **digest**: salted digest の純粋関数
//! - **salt**: 乱数ソースの抽象化（SaltSource port）
//! - **store**: JobStore trait + in-memory の HashStore（唯一の直列化点）
//! - **worker**: submission ごとの background hash worker
//! - **config**: StoreConfig（simulated delay, shutdown timeout）
//!
//! The store manager is the only component allowed to mutate shared state;
//! workers and callers interact with it through `store::JobStore`.

pub mod config;
pub mod digest;
pub mod domain;
pub mod salt;
pub mod store;

mod worker;

pub use config::StoreConfig;
pub use domain::{
    HashRecord, JobId, RecordState, StatsSnapshot, StoreCounts, StoreError, StorePhase,
};
pub use salt::{OsSalt, SaltSource};
pub use store::{HashStore, JobStore};
