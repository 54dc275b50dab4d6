//! Decision variable construction.
//!
//! Builds one boolean `plays[d,t,i,j]` per ordered pair of participants and
//! one boolean `isHome[d,t,p]` per participant, for every tournament and
//! every date within that tournament's active window, and keeps the index
//! bookkeeping needed to look a variable back up while building
//! constraints.

use std::collections::HashMap;

use good_lp::{variable, ProblemVariables, Variable};

use crate::config::EngineConfig;
use crate::error::EngineError;

use super::sizing::TournamentSizing;

/// Key identifying a `plays[d,t,i,j]` variable: tournament index, date
/// (1-based), home-participant index, away-participant index.
pub type PlaysKey = (usize, u32, usize, usize);

/// Key identifying an `isHome[d,t,p]` variable: tournament index, date
/// (1-based), participant index.
pub type HomeKey = (usize, u32, usize);

/// The index over one solve's decision variables: lookup tables from
/// `(tournament, date, ...)` coordinates to the `good_lp` `Variable` they
/// were registered as. The `ProblemVariables` builder itself lives
/// separately so this index can be shared (by reference, and moved into
/// the solver thread) independently of it.
#[derive(Clone)]
pub struct Variables {
    pub plays: HashMap<PlaysKey, Variable>,
    pub is_home: HashMap<HomeKey, Variable>,
}

impl Variables {
    /// Looks up the `plays[d,t,i,j]` variable, panicking if the pair is
    /// out of range for this build. Constraint code only ever calls this
    /// with indices it generated from the same [`TournamentSizing`] list,
    /// so a missing key indicates a bug in index bookkeeping, not bad
    /// input.
    pub fn plays(&self, t: usize, d: u32, i: usize, j: usize) -> Variable {
        self.plays[&(t, d, i, j)]
    }

    pub fn is_home(&self, t: usize, d: u32, p: usize) -> Variable {
        self.is_home[&(t, d, p)]
    }
}

/// Builds every `plays`/`isHome` variable for every tournament into
/// `problem`, returning [`EngineError::ModelTooLarge`] if the total
/// exceeds [`EngineConfig::max_variables`] before any variable is
/// actually created.
pub fn build_variables(
    problem: &mut ProblemVariables,
    sizings: &[TournamentSizing],
    config: &EngineConfig,
) -> Result<Variables, EngineError> {
    let mut total = 0usize;
    for s in sizings {
        let n = s.participants.len();
        total += (s.dates as usize) * n; // isHome
        total += (s.dates as usize) * n * (n.saturating_sub(1)); // plays, ordered pairs
    }
    if total > config.max_variables {
        return Err(EngineError::ModelTooLarge(format!(
            "model requires {total} variables, exceeding the configured bound of {}",
            config.max_variables
        )));
    }

    let mut plays = HashMap::with_capacity(total);
    let mut is_home = HashMap::new();

    for (t, s) in sizings.iter().enumerate() {
        let n = s.participants.len();
        for d in 1..=s.dates {
            for p in 0..n {
                let v = problem.add(variable().binary());
                is_home.insert((t, d, p), v);
            }
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let v = problem.add(variable().binary());
                    plays.insert((t, d, i, j), v);
                }
            }
        }
    }

    Ok(Variables { plays, is_home })
}
