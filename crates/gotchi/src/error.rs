//! Error types for the statistics engine

use thiserror::Error;

/// Data-shape failures surfaced by the statistics engine.
///
/// None of these are I/O errors; the orchestrator decides whether to log,
/// fall back or abort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("Unknown timezone identifier: {0}")]
    UnknownTimezone(String),

    #[error("No commits in the reporting window")]
    NoActivity,

    #[error("Reporting window of {0} days reaches outside the calendar")]
    WindowOutOfRange(u32),

    #[error("Invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },
}
