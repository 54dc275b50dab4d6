//! Logistical / capacity constraints: the shared-venue locality cap and
//! pairwise home exclusions, both restricted to *senior* tournaments per
//! spec.

use std::collections::HashMap;

use good_lp::{variable, Expression, ProblemVariables, SolverModel, Variable};

use crate::config::EngineConfig;
use crate::models::LeagueClass;

use super::sizing::TournamentSizing;
use super::variables::Variables;

/// For each club name that appears in a shared-venue group or a pairwise
/// exclusion, the `(tournament, participant)` indices of its appearances
/// in *senior* tournaments.
fn senior_appearances<'a>(
    sizings: &'a [TournamentSizing],
    clubs: impl Iterator<Item = &'a String>,
) -> HashMap<&'a str, Vec<(usize, usize)>> {
    let mut map: HashMap<&str, Vec<(usize, usize)>> = HashMap::new();
    for club in clubs {
        map.entry(club.as_str()).or_default();
    }
    for (t, s) in sizings.iter().enumerate() {
        if LeagueClass::from_tournament_id(&s.id) != LeagueClass::Seniors {
            continue;
        }
        for (p, name) in s.participants.iter().enumerate() {
            if let Some(entries) = map.get_mut(name.as_str()) {
                entries.push((t, p));
            }
        }
    }
    map
}

/// A per-(club, date) auxiliary boolean that upper-bounds ("is home in
/// *some* senior tournament today") every senior appearance of that club.
struct ClubHomeVar {
    club: String,
    date: u32,
    var: Variable,
}

pub struct CapacityIndicators {
    /// `club_home[(club, date)]` auxiliary booleans.
    club_home: Vec<ClubHomeVar>,
    club_home_index: HashMap<(String, u32), Variable>,
    /// Soft excess-over-cap variables, one per shared-venue group per
    /// date, contributing to the objective.
    excess: Vec<(Variable, u32 /* group index */, u32 /* date */)>,
}

impl CapacityIndicators {
    pub fn objective_terms(&self, weight: f64) -> Vec<(Variable, f64)> {
        self.excess.iter().map(|(v, _, _)| (*v, weight)).collect()
    }

    fn home_var(&self, club: &str, date: u32) -> Option<Variable> {
        self.club_home_index.get(&(club.to_string(), date)).copied()
    }
}

/// Declares the auxiliary "club is home today" booleans (for every club
/// named in a shared-venue group or a pairwise exclusion) and the excess
/// variables backing the soft capacity cap.
pub fn declare(
    problem: &mut ProblemVariables,
    sizings: &[TournamentSizing],
    config: &EngineConfig,
    horizon: u32,
) -> CapacityIndicators {
    let mut clubs: Vec<&String> = Vec::new();
    for g in &config.shared_venue_groups {
        clubs.extend(g.members.iter());
    }
    for (a, b) in &config.pairwise_exclusions {
        clubs.push(a);
        clubs.push(b);
    }
    let appearances = senior_appearances(sizings, clubs.into_iter());

    let mut club_home = Vec::new();
    let mut club_home_index = HashMap::new();
    for (&club, entries) in &appearances {
        if entries.is_empty() {
            continue;
        }
        for d in 1..=horizon {
            let has_variable_on_date = entries
                .iter()
                .any(|&(t, _)| d <= sizings[t].dates);
            if !has_variable_on_date {
                continue;
            }
            let v = problem.add(variable().binary());
            club_home_index.insert((club.to_string(), d), v);
            club_home.push(ClubHomeVar {
                club: club.to_string(),
                date: d,
                var: v,
            });
        }
    }

    let mut excess = Vec::new();
    for (gi, group) in config.shared_venue_groups.iter().enumerate() {
        for d in 1..=horizon {
            let any_member_active = group
                .members
                .iter()
                .any(|c| club_home_index.contains_key(&(c.clone(), d)));
            if !any_member_active {
                continue;
            }
            let v = problem.add(variable().min(0.0));
            excess.push((v, gi as u32, d));
        }
    }

    CapacityIndicators {
        club_home,
        club_home_index,
        excess,
    }
}

pub fn constrain<M: SolverModel>(
    mut model: M,
    vars: &Variables,
    sizings: &[TournamentSizing],
    config: &EngineConfig,
    indicators: &CapacityIndicators,
) -> M {
    let appearances = senior_appearances(
        sizings,
        indicators.club_home.iter().map(|c| &c.club),
    );

    // club_home[club, d] upper-bounds (and, under objective pressure,
    // equals) the maximum of the club's senior isHome indicators that
    // date.
    for ch in &indicators.club_home {
        if let Some(entries) = appearances.get(ch.club.as_str()) {
            for &(t, p) in entries {
                if ch.date <= sizings[t].dates {
                    let h = vars.is_home(t, ch.date, p);
                    model = model.with(Expression::from(ch.var).geq(h));
                }
            }
        }
    }

    // Soft shared-venue cap: excess >= sum(club_home) - K, excess >= 0.
    for (v, gi, d) in &indicators.excess {
        let group = &config.shared_venue_groups[*gi as usize];
        let mut sum = Expression::from(0.0);
        for member in &group.members {
            if let Some(h) = indicators.home_var(member, *d) {
                sum += h;
            }
        }
        model = super::linearize::excess_over_cap(model, *v, sum, group.cap as f64);
    }

    // Hard pairwise exclusion.
    for (a, b) in &config.pairwise_exclusions {
        for d in 1..=sizings.iter().map(|s| s.dates).max().unwrap_or(0) {
            let ha = indicators.home_var(a, d);
            let hb = indicators.home_var(b, d);
            if let (Some(ha), Some(hb)) = (ha, hb) {
                model = model.with((Expression::from(ha) + Expression::from(hb)).leq(1.0));
            }
        }
    }

    model
}
