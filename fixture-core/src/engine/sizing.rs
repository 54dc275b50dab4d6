//! Problem sizing: turning a [`Tournament`](crate::models::Tournament) into
//! concrete dimensions the variable-construction pass can use.

use crate::config::{EngineConfig, TournamentKind};
use crate::error::EngineError;
use crate::models::{FixtureInput, Tournament};

/// The synthetic participant name used to pad an odd-sized tournament to
/// an even number of entrants. Never emitted in the extracted fixture.
pub fn bye_name(tournament_id: &str) -> String {
    format!("Bye#{tournament_id}")
}

/// Whether a participant name is a synthetic bye, i.e. never a real club.
pub fn is_bye(name: &str) -> bool {
    name.starts_with("Bye#")
}

/// The derived dimensions of one tournament: its (possibly bye-padded)
/// participant list, how many legs each pairing plays, and how many match
/// dates it spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentSizing {
    pub id: String,
    /// Participants in input order, with a single synthetic bye appended
    /// if the real count is odd.
    pub participants: Vec<String>,
    /// The number of real (non-bye) participants, before padding.
    pub real_count: usize,
    /// Legs each unordered pair plays across the window (1 for single
    /// round-robin, 2 for double, `k` for an override).
    pub legs: u32,
    /// The tournament's active window is `[1, dates]`.
    pub dates: u32,
    /// Whether this tournament falls under the bye-clustering policy
    /// (participant count below [`EngineConfig::bye_clustering_threshold`]
    /// before padding).
    pub cluster_byes: bool,
}

impl TournamentSizing {
    /// Whether `p` is a padded-in synthetic participant of this
    /// tournament rather than a real club.
    pub fn is_bye_participant(&self, p: &str) -> bool {
        is_bye(p)
    }
}

/// Computes [`TournamentSizing`] for every tournament in the input, then
/// the global horizon `H = max(dates(t))`, clipped to
/// [`EngineConfig::global_horizon_cap`].
pub fn size_all(
    input: &FixtureInput,
    config: &EngineConfig,
) -> Result<(Vec<TournamentSizing>, u32), EngineError> {
    let mut sizings = Vec::with_capacity(input.tournaments.len());
    for t in &input.tournaments {
        sizings.push(size_tournament(t, config)?);
    }
    let horizon = sizings.iter().map(|s| s.dates).max().unwrap_or(0);
    let horizon = horizon.min(config.global_horizon_cap.max(1));
    Ok((sizings, horizon))
}

fn size_tournament(t: &Tournament, config: &EngineConfig) -> Result<TournamentSizing, EngineError> {
    if t.participants.is_empty() {
        return Err(EngineError::InputInvalid(format!(
            "tournament '{}' has no participants",
            t.id
        )));
    }
    let real_count = t.participants.len();
    let mut participants = t.participants.clone();
    if real_count % 2 == 1 {
        participants.push(bye_name(&t.id));
    }
    let n = participants.len() as u32;

    let (legs, dates) = match config.kind_for(&t.id) {
        TournamentKind::FullDoubleRoundRobin => (2, 2 * (n - 1)),
        TournamentKind::SingleRoundRobin => (1, n - 1),
        TournamentKind::Override { dates, legs } => (legs, dates),
    };
    let dates = dates.min(config.global_horizon_cap.max(1));

    Ok(TournamentSizing {
        id: t.id.clone(),
        participants,
        real_count,
        legs,
        dates,
        cluster_byes: (real_count as u32) < config.bye_clustering_threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tournament;

    fn tournament(id: &str, n: usize) -> Tournament {
        Tournament {
            id: id.to_string(),
            name: id.to_string(),
            participants: (0..n).map(|i| format!("club-{i}")).collect(),
        }
    }

    #[test]
    fn even_count_double_round_robin_needs_no_bye() {
        let s = size_tournament(&tournament("T", 4), &EngineConfig::default()).unwrap();
        assert_eq!(s.participants.len(), 4);
        assert_eq!(s.dates, 6);
        assert_eq!(s.legs, 2);
    }

    #[test]
    fn odd_count_gets_one_synthetic_bye() {
        let s = size_tournament(&tournament("T", 5), &EngineConfig::default()).unwrap();
        assert_eq!(s.participants.len(), 6);
        assert!(is_bye(s.participants.last().unwrap()));
        assert_eq!(s.dates, 10);
    }

    #[test]
    fn single_round_robin_halves_the_horizon() {
        let mut config = EngineConfig::default();
        config
            .tournament_kinds
            .insert("T".to_string(), TournamentKind::SingleRoundRobin);
        let s = size_tournament(&tournament("T", 4), &config).unwrap();
        assert_eq!(s.dates, 3);
        assert_eq!(s.legs, 1);
    }

    #[test]
    fn global_horizon_cap_clips_large_leagues() {
        let mut config = EngineConfig::default();
        config.global_horizon_cap = 10;
        let s = size_tournament(&tournament("T", 20), &config).unwrap();
        assert_eq!(s.dates, 10);
    }

    #[test]
    fn empty_participants_is_input_invalid() {
        let err = size_tournament(&tournament("T", 0), &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::InputInvalid(_)));
    }
}
