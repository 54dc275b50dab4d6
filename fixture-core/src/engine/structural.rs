//! Per-tournament structural constraints: play/home coupling, at-most-one
//! match per date, round-robin opponent counts, the soft leg-separation
//! preference, the hard home/away alternation bound, the hard half-mirror
//! of home indicators for double round-robins, and the soft bye-clustering
//! nudge for small leagues.

use good_lp::{variable, Expression, ProblemVariables, SolverModel, Variable};

use crate::config::{EngineConfig, WeightConfig};

use super::sizing::TournamentSizing;
use super::variables::Variables;

/// A soft leg-separation indicator: penalises the first-half match
/// `(i, j)` on date `d` not reappearing, reversed, at `d + D/2`.
struct LegSepIndicator {
    var: Variable,
    t: usize,
    d: u32,
    i: usize,
    j: usize,
}

/// A soft bye-clustering indicator: penalises a real participant's match
/// against the tournament's synthetic bye landing before the trailing
/// window reserved for byes.
struct ByeIndicator {
    var: Variable,
    t: usize,
    d: u32,
    p: usize,
    bye: usize,
}

/// Indicator variables declared by this module, created once up front so
/// they can be folded into the objective before the solver model is
/// built.
#[derive(Default)]
pub struct StructuralIndicators {
    leg_sep: Vec<LegSepIndicator>,
    bye: Vec<ByeIndicator>,
}

impl StructuralIndicators {
    /// This module's contribution to the objective: `(variable, weight)`
    /// pairs, all drawn from the structural-soft tier.
    pub fn objective_terms(&self, weights: &WeightConfig) -> Vec<(Variable, f64)> {
        let mut terms = Vec::with_capacity(self.leg_sep.len() + self.bye.len());
        for ind in &self.leg_sep {
            terms.push((ind.var, weights.half_mirror_weight));
        }
        for ind in &self.bye {
            terms.push((ind.var, weights.half_mirror_weight));
        }
        terms
    }
}

/// Declares the indicator variables this module needs before the model's
/// objective is built.
pub fn declare(problem: &mut ProblemVariables, sizings: &[TournamentSizing]) -> StructuralIndicators {
    let mut out = StructuralIndicators::default();

    for (t, s) in sizings.iter().enumerate() {
        let n = s.participants.len();
        let half = s.dates / 2;
        // Leg separation only makes sense for true double round-robins,
        // where the window naturally splits into two mirrored halves.
        if s.legs == 2 && half > 0 {
            for d in 1..=half {
                for i in 0..n {
                    for j in 0..n {
                        if i == j {
                            continue;
                        }
                        out.leg_sep.push(LegSepIndicator {
                            var: problem.add(variable().binary()),
                            t,
                            d,
                            i,
                            j,
                        });
                    }
                }
            }
        }

        if s.cluster_byes && s.real_count % 2 == 1 {
            let bye = n - 1;
            let tail = s.legs.max(1);
            if s.dates > tail {
                for d in 1..=(s.dates - tail) {
                    for p in 0..s.real_count {
                        out.bye.push(ByeIndicator {
                            var: problem.add(variable().binary()),
                            t,
                            d,
                            p,
                            bye,
                        });
                    }
                }
            }
        }
    }

    out
}

/// Adds every structural constraint — hard and the linearizations backing
/// the soft indicators declared by [`declare`] — to `model`.
pub fn constrain<M: SolverModel>(
    mut model: M,
    vars: &Variables,
    sizings: &[TournamentSizing],
    indicators: &StructuralIndicators,
    _config: &EngineConfig,
) -> M {
    for (t, s) in sizings.iter().enumerate() {
        let n = s.participants.len();
        let d_max = s.dates;

        for d in 1..=d_max {
            // 1. Play-home coupling.
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let p = vars.plays(t, d, i, j);
                    let hi = vars.is_home(t, d, i);
                    let hj = vars.is_home(t, d, j);
                    model = model.with(Expression::from(p).leq(hi));
                    model = model.with((Expression::from(p) + Expression::from(hj)).leq(1.0));
                }
            }

            // 2. At-most-one match per date per team.
            for i in 0..n {
                let mut sum = Expression::from(0.0);
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    sum += vars.plays(t, d, i, j);
                    sum += vars.plays(t, d, j, i);
                }
                model = model.with(sum.leq(1.0));
            }
        }

        // 3. Opponent count across the window.
        for i in 0..n {
            for j in (i + 1)..n {
                if s.legs == 2 {
                    let mut forward = Expression::from(0.0);
                    let mut backward = Expression::from(0.0);
                    for d in 1..=d_max {
                        forward += vars.plays(t, d, i, j);
                        backward += vars.plays(t, d, j, i);
                    }
                    model = model.with(forward.eq(1.0));
                    model = model.with(backward.eq(1.0));
                } else {
                    let mut sum = Expression::from(0.0);
                    for d in 1..=d_max {
                        sum += vars.plays(t, d, i, j);
                        sum += vars.plays(t, d, j, i);
                    }
                    model = model.with(sum.eq(s.legs as f64));
                }
            }
        }

        // 5. Home/away alternation (hard): no three dates in a row all
        // home or all away.
        if d_max >= 3 {
            for p in 0..n {
                for d in 1..=(d_max - 2) {
                    let sum = Expression::from(vars.is_home(t, d, p))
                        + Expression::from(vars.is_home(t, d + 1, p))
                        + Expression::from(vars.is_home(t, d + 2, p));
                    model = model.with(sum.clone().geq(1.0));
                    model = model.with(sum.leq(2.0));
                }
            }
        }

        // 6. Localised half-mirror of the home indicator (hard, double
        // round-robin only).
        if s.legs == 2 {
            let half = d_max / 2;
            for p in 0..n {
                for d in 1..=half {
                    let sum = Expression::from(vars.is_home(t, d, p))
                        + Expression::from(vars.is_home(t, d + half, p));
                    model = model.with(sum.eq(1.0));
                }
            }
        }
    }

    // 4. Leg separation (soft): v >= |plays[d,i,j] - plays[d+half,j,i]|.
    for ind in &indicators.leg_sep {
        let half = sizings[ind.t].dates / 2;
        let a = vars.plays(ind.t, ind.d, ind.i, ind.j);
        let b = vars.plays(ind.t, ind.d + half, ind.j, ind.i);
        model = super::linearize::differ_indicator(model, ind.var, a, b);
    }

    // 7. Bye clustering (soft): penalise a real participant meeting the
    // bye before the trailing window.
    for ind in &indicators.bye {
        let sum = Expression::from(vars.plays(ind.t, ind.d, ind.p, ind.bye))
            + Expression::from(vars.plays(ind.t, ind.d, ind.bye, ind.p));
        model = model.with(Expression::from(ind.var).geq(sum));
    }

    model
}
