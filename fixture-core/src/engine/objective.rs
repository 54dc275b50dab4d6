//! Objective assembly and the wall-clock-bounded solver driver.

use std::sync::mpsc;
use std::thread;

use good_lp::{Expression, Variable};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{DateFixture, SolveStatus};

/// Builds `Σ (variable · weight)` from every module's soft-violation
/// contributions.
pub fn build_objective(terms: &[(Variable, f64)]) -> Expression {
    let mut objective = Expression::from(0.0);
    for (v, w) in terms {
        objective += *v * *w;
    }
    objective
}

/// What a completed solve attempt resolves to, before the outer call maps
/// it onto [`crate::models::SolveOutcome`].
pub struct SolveOutcomeInternal {
    pub status: SolveStatus,
    pub fixture: Option<Vec<DateFixture>>,
}

/// Runs `attempt` (the full model-build-and-solve pipeline) on a worker
/// thread and waits for it, bounded by `config.wall_clock_budget()`. The
/// `good_lp`/HiGHS call inside `attempt` is itself uninterruptible from out
/// here, so a timeout on this end abandons the worker thread rather than
/// retrieving its in-progress incumbent — only `OPTIMAL`, `INFEASIBLE`, or
/// (on timeout) `UNKNOWN` come back from this driver.
pub fn solve_bounded<F>(config: &EngineConfig, attempt: F) -> Result<SolveOutcomeInternal, EngineError>
where
    F: FnOnce() -> Result<SolveOutcomeInternal, EngineError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let budget = config.wall_clock_budget();
    let wall_clock_budget_secs = config.wall_clock_budget_secs;
    thread::spawn(move || {
        let result = attempt();
        let _ = tx.send(result);
    });

    match rx.recv_timeout(budget) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            log::warn!(
                "solver exceeded the {wall_clock_budget_secs}s wall-clock budget; returning UNKNOWN"
            );
            Ok(SolveOutcomeInternal {
                status: SolveStatus::Unknown,
                fixture: None,
            })
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineError::SolverInternal(
            "solver worker thread terminated without a result".to_string(),
        )),
    }
}
