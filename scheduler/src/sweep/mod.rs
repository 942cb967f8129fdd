//! Cron-based scheduling of the periodic publish sweep.
//!
//! The sweep walks every schedulable item and flips the ones whose status
//! contradicts their publish window. It runs on a recurrence chosen from a
//! fixed list of intervals (see `config::SweepInterval`), registered as a
//! 6-field cron job (sec min hour day month dow).
//!
//! A failed tick is logged and retried at the next tick; there is no local
//! retry loop. Running the sweep twice around the same instant is harmless:
//! the second pass finds nothing left to flip.

pub mod operations;
pub use operations::SweepScheduler;

use serde::Serialize;

/// Result of one sweep pass.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SweepReport {
    /// Candidates that carried at least one window bound.
    pub evaluated: usize,
    pub published: usize,
    pub unpublished: usize,
    pub failed: usize,
}
