//! Shared boolean-violation linearizations.
//!
//! Every "softly enforce `a == b`" or "softly enforce `a != b`" constraint
//! in the engine reduces to one of these two indicator shapes. Kept in one
//! place so the structural, institutional, and capacity constraint
//! builders all produce the same kind of indicator variable.

use good_lp::{Expression, SolverModel, Variable};

/// Registers `v >= |a - b|` (tight at equality since `v` is only ever
/// multiplied by a positive objective weight, so the solver drives it to
/// its lower bound). `v` is 1 exactly when `a != b`.
pub fn differ_indicator<M: SolverModel>(model: M, v: Variable, a: Variable, b: Variable) -> M {
    let model = model.with(Expression::from(v).geq(Expression::from(a) - Expression::from(b)));
    model.with(Expression::from(v).geq(Expression::from(b) - Expression::from(a)))
}

/// Registers `v >= |a + b - 1|`. `v` is 1 exactly when `a == b`.
pub fn agree_indicator<M: SolverModel>(model: M, v: Variable, a: Variable, b: Variable) -> M {
    let model = model.with(
        Expression::from(v).geq(Expression::from(a) + Expression::from(b) - 1.0),
    );
    model.with(Expression::from(v).geq(1.0 - Expression::from(a) - Expression::from(b)))
}

/// Registers `excess >= sum - cap` and `excess >= 0`, the standard
/// `max(0, sum - cap)` linearization used by the capacity constraints.
pub fn excess_over_cap<M: SolverModel>(model: M, excess: Variable, sum: Expression, cap: f64) -> M {
    let model = model.with(Expression::from(excess).geq(sum - cap));
    model.with(Expression::from(excess).geq(0.0))
}
