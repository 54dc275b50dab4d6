//! A constraint-based scheduler for a multi-league football federation.
//!
//! Several independent round-robin tournaments (senior, youth, children,
//! women's) are scheduled jointly over a shared horizon of match-dates so
//! that, in addition to each tournament's own round-robin structure,
//! cross-league home/away synchronisation rules and shared-venue
//! logistical limits hold as well as the time budget allows.
//!
//! The entry point is [`solve`]: it takes a [`models::FixtureInput`] and an
//! [`config::EngineConfig`], formulates the scheduling problem as a 0/1
//! mixed-integer program, and returns a [`models::SolveOutcome`] carrying
//! either an extracted fixture or a reason none could be produced within
//! the configured wall-clock budget.
//!
//! # Example
//!
//! ```
//! use fixture_core::config::EngineConfig;
//! use fixture_core::models::{Club, FixtureInput, Tournament, VenueSpec};
//!
//! let input = FixtureInput {
//!     clubs: vec![
//!         Club { name: "RIVER".into(), locality: None, venue: VenueSpec::Single("Monumental".into()), owns_venue: true },
//!         Club { name: "BOCA".into(), locality: None, venue: VenueSpec::Single("Bombonera".into()), owns_venue: true },
//!     ],
//!     tournaments: vec![Tournament {
//!         id: "SENIORS-A".into(),
//!         name: "Seniors A".into(),
//!         participants: vec!["RIVER".into(), "BOCA".into()],
//!     }],
//!     rules: vec![],
//! };
//! let mut config = EngineConfig::default();
//! config.tournament_kinds.insert(
//!     "SENIORS-A".into(),
//!     fixture_core::config::TournamentKind::SingleRoundRobin,
//! );
//! let outcome = fixture_core::solve(&input, &config).unwrap();
//! assert!(outcome.status.unwrap().has_fixture());
//! ```

pub mod config;
pub mod error;
mod engine;
pub mod models;

pub use error::EngineError;
pub use models::SolveOutcome;

/// Solves one fixture scheduling problem.
///
/// Returns `Err` only when the input document is malformed
/// ([`EngineError::InputInvalid`]), the implied model exceeds the
/// configured safety bound ([`EngineError::ModelTooLarge`]), or the
/// solver backend returns a status this engine does not know how to
/// interpret ([`EngineError::SolverInternal`]). Every other outcome —
/// including an infeasible model or a wall-clock timeout — is reported as
/// a value inside [`models::SolveOutcome::status`], never as an error.
pub fn solve(input: &models::FixtureInput, config: &config::EngineConfig) -> Result<models::SolveOutcome, EngineError> {
    engine::run(input, config)
}
