//! Solution extraction: reads a solved assignment into the per-date,
//! per-tournament fixture document, resolving venues and filtering out
//! synthetic byes.

use std::collections::HashMap;

use good_lp::Solution;

use crate::models::{Club, DateFixture, LeagueClass, Match};

use super::sizing::{is_bye, TournamentSizing};
use super::variables::Variables;

/// Reads every `plays[d,t,i,j]` variable true in `solution` into a fixture
/// document, dropping empty tournament-date groups.
pub fn extract<S: Solution>(
    solution: &S,
    vars: &Variables,
    sizings: &[TournamentSizing],
    clubs: &HashMap<String, Club>,
) -> Vec<DateFixture> {
    let mut out = Vec::new();

    for (t, s) in sizings.iter().enumerate() {
        let class = LeagueClass::from_tournament_id(&s.id);
        let n = s.participants.len();

        for d in 1..=s.dates {
            let mut matches = Vec::new();
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let v = vars.plays(t, d, i, j);
                    if solution.value(v) <= 0.5 {
                        continue;
                    }
                    let home_name = &s.participants[i];
                    let away_name = &s.participants[j];
                    let home_bye = is_bye(home_name);
                    let away_bye = is_bye(away_name);

                    let venue = if home_bye {
                        // Bye dates still resolve a venue through the real side.
                        clubs
                            .get(away_name)
                            .map(|c| c.venue.resolve(class))
                            .unwrap_or_else(|| "pending".to_string())
                    } else {
                        clubs
                            .get(home_name)
                            .map(|c| c.venue.resolve(class))
                            .unwrap_or_else(|| "pending".to_string())
                    };

                    matches.push(Match {
                        home: if home_bye { "BYE".to_string() } else { home_name.clone() },
                        away: if away_bye { "BYE".to_string() } else { away_name.clone() },
                        venue,
                    });
                }
            }
            if !matches.is_empty() {
                out.push(DateFixture {
                    date: d,
                    tournament: s.id.clone(),
                    matches,
                });
            }
        }
    }

    out
}
