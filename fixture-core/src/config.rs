//! Engine configuration.
//!
//! Every tunable the scheduling model needs beyond the raw input document
//! lives here rather than as a literal inside constraint-building code, so
//! that callers can reproduce a run, sweep weights, or loosen a horizon
//! without touching the engine's source.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How many legs a tournament plays and over what horizon.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TournamentKind {
    /// Every pair of participants meets twice, home and away.
    FullDoubleRoundRobin,
    /// Every pair of participants meets once.
    SingleRoundRobin,
    /// An explicit override of the number of match dates and legs, for
    /// tournaments that don't follow either standard shape.
    Override { dates: u32, legs: u32 },
}

impl Default for TournamentKind {
    fn default() -> Self {
        TournamentKind::FullDoubleRoundRobin
    }
}

/// A cluster of clubs that share a single municipal ground and so cannot
/// all host on the same date past some capacity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SharedVenueGroup {
    /// Club names sharing the venue.
    pub members: Vec<String>,
    /// Maximum number of simultaneous home fixtures the venue can host on
    /// one date.
    pub cap: u32,
}

/// The weighted soft-objective hierarchy from the engine's design notes.
/// Later tiers are deliberately an order of magnitude apart so the solver
/// never trades a higher tier off against a lower one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeightConfig {
    /// Penalty per date the half-mirror leg-separation soft constraint is
    /// violated.
    pub half_mirror_weight: f64,
    /// Penalty per violation of a [`crate::models::Rule`] marked `hard:
    /// true`.
    pub hard_rule_weight: f64,
    /// Default penalty for a soft (non-hard) rule with no explicit
    /// `weight` override.
    pub soft_rule_weight_default: f64,
    /// Penalty tier used for soft rules whose endpoints both fall in the
    /// youth or children league classes, which are weighted above generic
    /// soft rules but below hard ones.
    pub youth_children_rule_weight: f64,
    /// Penalty per unit of shared-venue capacity excess.
    pub capacity_excess_weight: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        WeightConfig {
            half_mirror_weight: 1_000_000.0,
            hard_rule_weight: 5_000_000.0,
            soft_rule_weight_default: 5_000.0,
            youth_children_rule_weight: 50_000.0,
            capacity_excess_weight: 50.0,
        }
    }
}

/// All tunables the engine consults while building and solving a model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Per-tournament overrides of [`TournamentKind`]. Tournaments absent
    /// from this map use [`TournamentKind::default`].
    #[serde(default)]
    pub tournament_kinds: HashMap<String, TournamentKind>,

    /// An upper bound on the number of match dates any single tournament
    /// may be scheduled over, regardless of its computed horizon. Acts as
    /// a sanity cap rather than a scheduling target.
    #[serde(default = "default_global_horizon_cap")]
    pub global_horizon_cap: u32,

    /// Tournaments with fewer than this many participants (after bye
    /// padding) have their byes clustered at the end of the horizon rather
    /// than spread out, since a sparse small league reads oddly with byes
    /// scattered through it.
    #[serde(default = "default_bye_clustering_threshold")]
    pub bye_clustering_threshold: u32,

    /// Clubs whose stadium capacity is shared and therefore capped per
    /// date. Only applies to tournaments in [`crate::models::LeagueClass::Seniors`].
    #[serde(default)]
    pub shared_venue_groups: Vec<SharedVenueGroup>,

    /// Pairs of club names that can never both host on the same date
    /// (e.g. a derby whose venues sit across the street from one
    /// another). Enforced as a hard constraint, senior tournaments only.
    #[serde(default)]
    pub pairwise_exclusions: Vec<(String, String)>,

    /// The soft-objective weight hierarchy.
    #[serde(default)]
    pub weights: WeightConfig,

    /// Wall-clock budget given to the solver before it returns its best
    /// incumbent (or [`crate::models::SolveStatus::Unknown`] if none was
    /// found).
    #[serde(default = "default_wall_clock_budget_secs")]
    pub wall_clock_budget_secs: u64,

    /// Safety bound on the number of decision variables the model may
    /// create; exceeding it raises [`crate::error::EngineError::ModelTooLarge`]
    /// before any variable is built.
    #[serde(default = "default_max_variables")]
    pub max_variables: usize,
}

fn default_global_horizon_cap() -> u32 {
    60
}

fn default_bye_clustering_threshold() -> u32 {
    6
}

fn default_wall_clock_budget_secs() -> u64 {
    120
}

fn default_max_variables() -> usize {
    2_000_000
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tournament_kinds: HashMap::new(),
            global_horizon_cap: default_global_horizon_cap(),
            bye_clustering_threshold: default_bye_clustering_threshold(),
            shared_venue_groups: Vec::new(),
            pairwise_exclusions: Vec::new(),
            weights: WeightConfig::default(),
            wall_clock_budget_secs: default_wall_clock_budget_secs(),
            max_variables: default_max_variables(),
        }
    }
}

impl EngineConfig {
    /// The kind applicable to a given tournament id, defaulting to
    /// [`TournamentKind::FullDoubleRoundRobin`] when unconfigured.
    pub fn kind_for(&self, tournament_id: &str) -> TournamentKind {
        self.tournament_kinds
            .get(tournament_id)
            .cloned()
            .unwrap_or_default()
    }

    /// The wall-clock budget as a [`Duration`], for use by the solver
    /// driver thread.
    pub fn wall_clock_budget(&self) -> Duration {
        Duration::from_secs(self.wall_clock_budget_secs)
    }
}
