//! Result lookup layer.
//!
//! Finds a driver's or team's row in a round's result sheet through the
//! injected name normalizer. Race data from ingestion is incomplete more
//! often than not (a DNS driver may be missing entirely), so every lookup
//! here degrades to "not found" / zero instead of erroring.

use tracing::debug;

use crate::models::{DriverRaceResult, RaceResult, TeamRaceResult};
use crate::ports::{NameNormalizer, RosterLookup, TeamScoreLookup};

/// Find a driver's result row. Tolerates null-ish names and rows whose
/// spelling differs from the query; both sides go through the normalizer,
/// falling back to a case-insensitive raw comparison for rows the
/// dictionary does not know.
pub fn find_driver_result<'a>(
    normalizer: &dyn NameNormalizer,
    driver: &str,
    results: &'a [DriverRaceResult],
) -> Option<&'a DriverRaceResult> {
    let canonical = normalizer.normalize_driver(driver)?;
    results.iter().find(|row| {
        match normalizer.normalize_driver(&row.driver) {
            Some(row_canonical) => row_canonical == canonical,
            None => row.driver.trim().eq_ignore_ascii_case(canonical.as_str()),
        }
    })
}

/// Find a team's aggregate row.
pub fn find_team_result<'a>(
    normalizer: &dyn NameNormalizer,
    team: &str,
    results: &'a [TeamRaceResult],
) -> Option<&'a TeamRaceResult> {
    let canonical = normalizer.normalize_team(team)?;
    results.iter().find(|row| {
        match normalizer.normalize_team(&row.team) {
            Some(row_canonical) => row_canonical == canonical,
            None => row.team.trim().eq_ignore_ascii_case(canonical.as_str()),
        }
    })
}

/// A team's countable points for a round: race points, plus sprint points
/// on sprint weekends. Zero when the team has no row.
pub fn team_round_points(normalizer: &dyn NameNormalizer, team: &str, race: &RaceResult) -> f64 {
    match find_team_result(normalizer, team, &race.team_results) {
        Some(row) => {
            if race.is_sprint_weekend {
                row.race_points + row.sprint_points
            } else {
                row.race_points
            }
        }
        None => {
            debug!(team, round = race.round, "no team result row, scoring 0");
            0.0
        }
    }
}

/// The other driver on the same team, or `None` when the driver is
/// unknown or the roster has no second member.
pub fn teammate_of(
    normalizer: &dyn NameNormalizer,
    roster: &dyn RosterLookup,
    driver: &str,
) -> Option<String> {
    let canonical = normalizer.normalize_driver(driver)?;
    let team = roster.driver_team(&canonical)?;
    roster
        .team_drivers(&team)
        .into_iter()
        .find(|d| d != &canonical)
}

/// [`TeamScoreLookup`] answering from the in-hand result sheet. This is
/// the default Espionage source: the target team's actual round total.
pub struct RaceResultTeamScores<'a> {
    race: &'a RaceResult,
    normalizer: &'a dyn NameNormalizer,
}

impl<'a> RaceResultTeamScores<'a> {
    pub fn new(race: &'a RaceResult, normalizer: &'a dyn NameNormalizer) -> Self {
        Self { race, normalizer }
    }
}

impl TeamScoreLookup for RaceResultTeamScores<'_> {
    fn team_round_total(&self, team: &str, season: u16, round: u8) -> Option<f64> {
        if season != self.race.season || round != self.race.round {
            return None;
        }
        find_team_result(self.normalizer, team, &self.race.team_results)
            .map(|row| row.total_points)
    }
}
