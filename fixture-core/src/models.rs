//! Wire-level data model for the fixture scheduling engine.
//!
//! These are the types the engine reads and writes: the normalised input
//! document (clubs, tournaments, institutional rules) and the fixture
//! document it produces. Both shapes are the textual key/value trees
//! described in the engine's external interface — nothing here is specific
//! to any transport, so the same types serialize equally well to JSON
//! files, HTTP bodies, or CLI stdin/stdout.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A real-world football institution. Uniquely identified by `name`.
///
/// # Example
///
/// ```
/// use fixture_core::models::{Club, VenueSpec};
///
/// let club = Club {
///     name: "ATLETICO AYACUCHO".to_string(),
///     locality: Some("Ayacucho".to_string()),
///     venue: VenueSpec::Single("Estadio Ayacucho".to_string()),
///     owns_venue: true,
/// };
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct Club {
    /// Unique display name for this club.
    pub name: String,
    /// Optional town/city the club is based in.
    #[serde(default)]
    pub locality: Option<String>,
    /// Where this club plays its home matches.
    pub venue: VenueSpec,
    /// Whether the club owns the venue it lists (as opposed to sharing a
    /// municipal ground with other clubs).
    #[serde(default = "default_true")]
    pub owns_venue: bool,
}

fn default_true() -> bool {
    true
}

/// A club's home venue, either a single ground used for every league it
/// competes in, or a per-league-class mapping (a club's children's side may
/// play at a different ground than its senior side).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum VenueSpec {
    /// One venue used regardless of which tournament is being played.
    Single(String),
    /// Venue keyed by league-class tag (`SENIORS`, `YOUTH`, `CHILDREN`,
    /// `WOMEN`, or `default` as a fallback).
    ByClass(HashMap<String, String>),
}

impl VenueSpec {
    /// Resolves the venue name for a given league class, falling back to
    /// `"default"` and then to `"pending"`.
    pub fn resolve(&self, class: LeagueClass) -> String {
        match self {
            VenueSpec::Single(name) => name.clone(),
            VenueSpec::ByClass(map) => map
                .get(class.tag())
                .or_else(|| map.get("default"))
                .cloned()
                .unwrap_or_else(|| "pending".to_string()),
        }
    }
}

/// The league-class tag used both to pick a venue out of a [`VenueSpec`]
/// and to decide whether a tournament participates in the senior-only
/// logistical capacity constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeagueClass {
    Seniors,
    Youth,
    Children,
    Women,
    Default,
}

impl LeagueClass {
    /// Returns the class matching a tournament id prefix, e.g.
    /// `"SENIORS-A"` → [`LeagueClass::Seniors`].
    pub fn from_tournament_id(id: &str) -> Self {
        let upper = id.to_ascii_uppercase();
        if upper.starts_with("SENIORS") {
            LeagueClass::Seniors
        } else if upper.starts_with("YOUTH") {
            LeagueClass::Youth
        } else if upper.starts_with("CHILDREN") {
            LeagueClass::Children
        } else if upper.starts_with("WOMEN") {
            LeagueClass::Women
        } else {
            LeagueClass::Default
        }
    }

    fn tag(self) -> &'static str {
        match self {
            LeagueClass::Seniors => "SENIORS",
            LeagueClass::Youth => "YOUTH",
            LeagueClass::Children => "CHILDREN",
            LeagueClass::Women => "WOMEN",
            LeagueClass::Default => "default",
        }
    }
}

/// A single round-robin or double round-robin competition among a subset
/// of clubs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct Tournament {
    /// Unique identifier, e.g. `"SENIORS-A"`, `"WOMEN-SENIORS"`.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Ordered list of participating club names. Every entry must resolve
    /// to a [`Club`] in the same input document.
    pub participants: Vec<String>,
}

/// The kind of cross-tournament home/away synchronisation a [`Rule`]
/// expresses between two `(club, tournament)` endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleKind {
    /// The two endpoints must be home/away on the same side on every
    /// shared date.
    Mirror,
    /// The two endpoints must be on opposite sides on every shared date.
    Inverse,
}

/// An institutional rule relating two `(club, tournament)` endpoints.
///
/// Rules are always soft in the objective: even a `hard: true` rule is
/// enforced via a heavily-weighted violation indicator rather than a hard
/// linear constraint, so that two conflicting rules never make the model
/// infeasible.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct Rule {
    pub kind: RuleKind,
    pub source_club: String,
    pub source_tournament: String,
    pub target_club: String,
    pub target_tournament: String,
    /// Whether this rule should be weighted as a near-hard constraint.
    #[serde(default)]
    pub hard: bool,
    /// Explicit penalty weight override. Ignored when `hard` is true (the
    /// hard-rule weight from [`crate::config::WeightConfig`] is used
    /// instead).
    #[serde(default)]
    pub weight: Option<u32>,
}

/// The complete normalised input document consumed by [`crate::solve`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, JsonSchema)]
pub struct FixtureInput {
    pub clubs: Vec<Club>,
    pub tournaments: Vec<Tournament>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// A single fixture between two participants on a given date.
///
/// `home`/`away` are club names, or the literal string `"BYE"` when the
/// opposing side was a synthetic padding participant.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct Match {
    pub home: String,
    pub away: String,
    pub venue: String,
}

/// All matches played by one tournament on one date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct DateFixture {
    pub date: u32,
    pub tournament: String,
    pub matches: Vec<Match>,
}

/// The status the underlying solver reported.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    /// A provably optimal assignment was found within the time budget.
    Optimal,
    /// A feasible (not necessarily optimal) assignment was found, either
    /// because the wall-clock budget elapsed with an incumbent in hand.
    Feasible,
    /// The model is provably infeasible.
    Infeasible,
    /// The wall-clock budget elapsed before any feasible assignment was
    /// found.
    Unknown,
    /// The model itself could not be built from the given input/config.
    ModelInvalid,
}

impl SolveStatus {
    /// Whether this status carries a usable fixture.
    pub fn has_fixture(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// The result of a solve: a fixture (present for [`SolveStatus::Optimal`]
/// and [`SolveStatus::Feasible`]) alongside the status that produced it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, JsonSchema)]
pub struct SolveOutcome {
    pub fixture: Option<Vec<DateFixture>>,
    pub status: Option<SolveStatus>,
}

impl Default for SolveStatus {
    fn default() -> Self {
        SolveStatus::Unknown
    }
}
