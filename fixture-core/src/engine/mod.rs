//! The scheduling engine: sizing, variable and constraint construction,
//! the objective, the solver driver, and solution extraction.
//!
//! [`run`] is the only entry point other modules in this crate call; it
//! owns the full pipeline described in the engine's design, from
//! validating the input document through to the extracted fixture.

mod capacity;
mod extraction;
mod institutional;
mod linearize;
mod objective;
mod sizing;
mod structural;
mod variables;

use std::collections::{HashMap, HashSet};

use good_lp::{highs, ProblemVariables, SolverModel};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{FixtureInput, SolveOutcome};

/// Validates that every club name is unique, every tournament id is
/// unique, every tournament participant resolves to a known club, and
/// every rule endpoint resolves to a known `(tournament, participant)`
/// pair — all before a single decision variable is built.
fn validate(input: &FixtureInput) -> Result<(), EngineError> {
    let mut club_names = HashSet::new();
    for c in &input.clubs {
        if !club_names.insert(c.name.as_str()) {
            return Err(EngineError::InputInvalid(format!(
                "duplicate club name '{}'",
                c.name
            )));
        }
    }

    let mut tournament_participants: HashMap<&str, &Vec<String>> = HashMap::new();
    let mut tournament_ids = HashSet::new();
    for t in &input.tournaments {
        if !tournament_ids.insert(t.id.as_str()) {
            return Err(EngineError::InputInvalid(format!(
                "duplicate tournament id '{}'",
                t.id
            )));
        }
        for p in &t.participants {
            if !club_names.contains(p.as_str()) {
                return Err(EngineError::InputInvalid(format!(
                    "tournament '{}' references unknown club '{}'",
                    t.id, p
                )));
            }
        }
        tournament_participants.insert(t.id.as_str(), &t.participants);
    }

    for r in &input.rules {
        validate_rule_endpoint(&tournament_participants, &r.source_tournament, &r.source_club)?;
        validate_rule_endpoint(&tournament_participants, &r.target_tournament, &r.target_club)?;
    }

    Ok(())
}

/// Checks that `(tournament_id, club)` names a real participant, raising
/// the same [`EngineError::InputInvalid`] a dangling rule reference would
/// otherwise only surface once [`institutional::declare`] looks it up
/// against tournament sizings.
fn validate_rule_endpoint(
    tournament_participants: &HashMap<&str, &Vec<String>>,
    tournament_id: &str,
    club: &str,
) -> Result<(), EngineError> {
    let participants = tournament_participants.get(tournament_id).ok_or_else(|| {
        EngineError::InputInvalid(format!(
            "rule references unknown tournament '{tournament_id}'"
        ))
    })?;
    if !participants.iter().any(|p| p == club) {
        return Err(EngineError::InputInvalid(format!(
            "rule references unknown participant '{club}' in tournament '{tournament_id}'"
        )));
    }
    Ok(())
}

/// Runs the full pipeline for one solve.
pub fn run(input: &FixtureInput, config: &EngineConfig) -> Result<SolveOutcome, EngineError> {
    validate(input)?;

    let (sizings, horizon) = sizing::size_all(input, config)?;
    log::info!(
        "sized {} tournament(s), global horizon H={}",
        sizings.len(),
        horizon
    );

    let clubs: HashMap<String, _> = input.clubs.iter().map(|c| (c.name.clone(), c.clone())).collect();

    let mut problem = ProblemVariables::new();
    let vars = variables::build_variables(&mut problem, &sizings, config)?;
    let structural_indicators = structural::declare(&mut problem, &sizings);
    let institutional_indicators =
        institutional::declare(&mut problem, &sizings, &input.rules, &config.weights)?;
    let capacity_indicators = capacity::declare(&mut problem, &sizings, config, horizon);

    let mut terms = Vec::new();
    terms.extend(structural_indicators.objective_terms(&config.weights));
    terms.extend(institutional_indicators.objective_terms());
    terms.extend(capacity_indicators.objective_terms(config.weights.capacity_excess_weight));
    let objective = objective::build_objective(&terms);

    let budget_config = config.clone();
    let solver_config = config.clone();
    let rules_sizings = sizings.clone();
    let outcome = objective::solve_bounded(&budget_config, move || {
        let model = problem.minimise(objective).using(highs);
        let model = structural::constrain(model, &vars, &rules_sizings, &structural_indicators, &solver_config);
        let model = institutional::constrain(model, &vars, &institutional_indicators);
        let model = capacity::constrain(model, &vars, &rules_sizings, &solver_config, &capacity_indicators);

        match model.solve() {
            Ok(solution) => {
                let fixture = extraction::extract(&solution, &vars, &rules_sizings, &clubs);
                Ok(objective::SolveOutcomeInternal {
                    status: crate::models::SolveStatus::Optimal,
                    fixture: Some(fixture),
                })
            }
            Err(e) => {
                let msg = e.to_string();
                if msg.to_ascii_lowercase().contains("infeasible") {
                    Ok(objective::SolveOutcomeInternal {
                        status: crate::models::SolveStatus::Infeasible,
                        fixture: None,
                    })
                } else {
                    Err(EngineError::SolverInternal(msg))
                }
            }
        }
    })?;

    Ok(SolveOutcome {
        fixture: outcome.fixture,
        status: Some(outcome.status),
    })
}
