//! Input-validation failures of a plan request.

use thiserror::Error;

/// Reasons a plan cannot be generated at all.
///
/// Late arrivals and overtime are not errors; they are reported as
/// violations on an otherwise successful plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("no stops provided")]
    EmptyStops,
    #[error("no eligible stops after filtering ({excluded} excluded)")]
    NoEligibleStops { excluded: usize },
    #[error("shift start ({start}) must be before shift end ({end})")]
    InvalidShift { start: i32, end: i32 },
}
