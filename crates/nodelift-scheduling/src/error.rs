//! Scheduler error types.

use thiserror::Error;

/// Errors that abort a scheduling pass.
///
/// Requirement incompatibility is deliberately not represented here: it is
/// an expected, frequent control-flow signal consumed inside the grouping
/// pass to decide schedule membership, never surfaced to callers.
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// The topology collaborator failed. Fatal: no schedules are returned.
    #[error("injecting topology: {0}")]
    InjectingTopology(#[from] anyhow::Error),
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
