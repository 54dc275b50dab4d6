//! Error taxonomy for the fixture scheduling engine.
//!
//! Mirrors the error classes described in the engine's design: input
//! validation failures are raised before any solver variable is built,
//! while solver outcomes other than a feasible/optimal assignment are
//! returned as `SolveOutcome` values rather than propagated as errors.

use thiserror::Error;

/// Errors the engine can return. Only [`EngineError::InputInvalid`] and
/// [`EngineError::ModelTooLarge`] prevent a solve attempt outright; solver
/// statuses such as infeasibility or timeout are represented by
/// [`crate::models::SolveStatus`] inside a successful `solve()` call, not by
/// this enum, so that callers can distinguish "the request was malformed"
/// from "the solver tried and didn't find a feasible fixture in time."
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Missing fields, a dangling club/tournament reference, or duplicate
    /// names in the input document.
    #[error("input invalid: {0}")]
    InputInvalid(String),

    /// The number of decision variables implied by the input exceeds the
    /// configured safety bound (`EngineConfig::max_variables`).
    #[error("model too large: {0}")]
    ModelTooLarge(String),

    /// The solver backend returned a status this engine does not know how
    /// to interpret.
    #[error("solver returned an unexpected internal status: {0}")]
    SolverInternal(String),
}
