//! Cross-tournament institutional rules (MIRROR/INVERSE) linking two
//! `(club, tournament)` endpoints. Always soft, regardless of the rule's
//! `hard` flag, so that two conflicting rules never make the model
//! infeasible — `hard` only selects a much larger penalty weight.

use std::collections::HashMap;

use good_lp::{variable, ProblemVariables, SolverModel, Variable};

use crate::config::WeightConfig;
use crate::error::EngineError;
use crate::models::{LeagueClass, Rule, RuleKind};

use super::sizing::TournamentSizing;
use super::variables::Variables;

struct RuleIndicator {
    var: Variable,
    kind: RuleKind,
    t_a: usize,
    p_a: usize,
    t_b: usize,
    p_b: usize,
    weight: f64,
}

/// Indicator variables for every (deduplicated) rule's violation, one per
/// shared date.
#[derive(Default)]
pub struct InstitutionalIndicators {
    items: Vec<(RuleIndicator, u32)>,
}

impl InstitutionalIndicators {
    pub fn objective_terms(&self) -> Vec<(Variable, f64)> {
        self.items.iter().map(|(ind, _)| (ind.var, ind.weight)).collect()
    }
}

/// Canonicalises rules by the unordered pair of endpoints together with
/// kind, merging duplicates: the merged rule is hard if any duplicate was
/// hard, and keeps the largest explicit weight among them.
fn dedup_rules(rules: &[Rule]) -> Vec<Rule> {
    let mut by_key: HashMap<(String, String, String, String, &'static str), Rule> = HashMap::new();
    for r in rules {
        let mut a = (r.source_club.clone(), r.source_tournament.clone());
        let mut b = (r.target_club.clone(), r.target_tournament.clone());
        if b < a {
            std::mem::swap(&mut a, &mut b);
        }
        let kind_tag = match r.kind {
            RuleKind::Mirror => "MIRROR",
            RuleKind::Inverse => "INVERSE",
        };
        let key = (a.0, a.1, b.0, b.1, kind_tag);
        by_key
            .entry(key)
            .and_modify(|existing| {
                existing.hard = existing.hard || r.hard;
                existing.weight = match (existing.weight, r.weight) {
                    (Some(x), Some(y)) => Some(x.max(y)),
                    (Some(x), None) => Some(x),
                    (None, Some(y)) => Some(y),
                    (None, None) => None,
                };
            })
            .or_insert_with(|| r.clone());
    }
    by_key.into_values().collect()
}

fn find_participant(sizings: &[TournamentSizing], tournament_id: &str, club: &str) -> Option<(usize, usize)> {
    let (t, s) = sizings.iter().enumerate().find(|(_, s)| s.id == tournament_id)?;
    let p = s.participants.iter().position(|name| name == club)?;
    Some((t, p))
}

fn weight_for(rule: &Rule, t_a: &str, t_b: &str, weights: &WeightConfig) -> f64 {
    if rule.hard {
        return weights.hard_rule_weight;
    }
    let touches_youth_or_children = [t_a, t_b].iter().any(|id| {
        matches!(
            LeagueClass::from_tournament_id(id),
            LeagueClass::Youth | LeagueClass::Children
        )
    });
    if touches_youth_or_children {
        return weights.youth_children_rule_weight;
    }
    rule.weight.map(|w| w as f64).unwrap_or(weights.soft_rule_weight_default)
}

/// Declares one violation indicator per rule per shared date. Rule
/// endpoints are already known to resolve to real participants by this
/// point — `super::validate` checks every rule before any tournament is
/// sized or any variable is built — so a lookup miss here indicates a bug
/// in that earlier validation pass, not bad input.
pub fn declare(
    problem: &mut ProblemVariables,
    sizings: &[TournamentSizing],
    rules: &[Rule],
    weights: &WeightConfig,
) -> Result<InstitutionalIndicators, EngineError> {
    let mut out = InstitutionalIndicators::default();
    let deduped = dedup_rules(rules);

    for rule in &deduped {
        let (t_a, p_a) = find_participant(sizings, &rule.source_tournament, &rule.source_club).ok_or_else(|| {
            EngineError::InputInvalid(format!(
                "rule references unknown participant '{}' in tournament '{}'",
                rule.source_club, rule.source_tournament
            ))
        })?;
        let (t_b, p_b) = find_participant(sizings, &rule.target_tournament, &rule.target_club).ok_or_else(|| {
            EngineError::InputInvalid(format!(
                "rule references unknown participant '{}' in tournament '{}'",
                rule.target_club, rule.target_tournament
            ))
        })?;

        let overlap = sizings[t_a].dates.min(sizings[t_b].dates);
        let weight = weight_for(rule, &rule.source_tournament, &rule.target_tournament, weights);

        for d in 1..=overlap {
            let ind = RuleIndicator {
                var: problem.add(variable().binary()),
                kind: rule.kind,
                t_a,
                p_a,
                t_b,
                p_b,
                weight,
            };
            out.items.push((ind, d));
        }
    }

    Ok(out)
}

pub fn constrain<M: SolverModel>(mut model: M, vars: &Variables, indicators: &InstitutionalIndicators) -> M {
    for (ind, d) in &indicators.items {
        let a = vars.is_home(ind.t_a, *d, ind.p_a);
        let b = vars.is_home(ind.t_b, *d, ind.p_b);
        model = match ind.kind {
            RuleKind::Mirror => super::linearize::differ_indicator(model, ind.var, a, b),
            RuleKind::Inverse => super::linearize::agree_indicator(model, ind.var, a, b),
        };
    }
    model
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(hard: bool, weight: Option<u32>) -> Rule {
        Rule {
            kind: RuleKind::Mirror,
            source_club: "A".into(),
            source_tournament: "T1".into(),
            target_club: "AP".into(),
            target_tournament: "T2".into(),
            hard,
            weight,
        }
    }

    #[test]
    fn dedups_by_unordered_endpoint_pair_and_kind() {
        let reversed = Rule {
            source_club: "AP".into(),
            source_tournament: "T2".into(),
            target_club: "A".into(),
            target_tournament: "T1".into(),
            ..rule(false, Some(100))
        };
        let merged = dedup_rules(&[rule(false, Some(100)), reversed]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn merging_keeps_hard_and_the_larger_weight() {
        let merged = dedup_rules(&[rule(false, Some(100)), rule(true, Some(50))]);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].hard);
        assert_eq!(merged[0].weight, Some(100));
    }
}
