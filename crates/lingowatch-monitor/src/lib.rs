//! Orchestration layer: enumerates check units from the company config, runs
//! detectors concurrently with partial-failure isolation, persists snapshots,
//! and forwards emitted signals to the configured alert sink.

pub mod runner;
pub mod scheduler;
pub mod sink;
pub mod store;

pub use runner::{plan_units, run_checks, CheckContext, CheckUnit, RunSummary};
pub use scheduler::build_scheduler;
pub use sink::AlertSink;
pub use store::{SnapshotBackend, StoreError};
