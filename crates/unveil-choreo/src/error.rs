//! Construction-time validation errors.
//!
//! The only error this crate raises is `MalformedStepError`, surfaced
//! synchronously from `Timeline::build`. Runtime races with teardown
//! (a watched element disappearing before its trigger fires, a handle
//! cancelled twice) are defined behavior, not errors.

use thiserror::Error;

use super::types::StageProperty;

/// A step declaration that cannot be scheduled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedStepError {
    /// A step's from/to endpoints animate different property sets.
    #[error(
        "step {index}: from-state and to-state animate different properties \
         (from: {from_keys:?}, to: {to_keys:?})"
    )]
    MismatchedEndpoints {
        /// Index of the offending step in declaration order.
        index: usize,
        /// Properties the from-state carries.
        from_keys: Vec<StageProperty>,
        /// Properties the to-state carries.
        to_keys: Vec<StageProperty>,
    },

    /// A step declared a negative duration.
    #[error("step {index}: duration must be >= 0 ms, got {duration_ms}")]
    NegativeDuration {
        /// Index of the offending step in declaration order.
        index: usize,
        /// The declared duration.
        duration_ms: f32,
    },
}
