//! Per-round race result data.
//!
//! The engine receives these as plain data from the ingestion layer and
//! never mutates them. Invariants from ingestion: exactly one row per
//! driver per round, DNS rows carry zero points.

use serde::{Deserialize, Serialize};

/// One driver's classification for a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverRaceResult {
    pub driver: String,
    /// Final classified position. `None` for unclassified entries.
    #[serde(default)]
    pub position: Option<u32>,
    /// Grand prix points scored.
    #[serde(default)]
    pub points: f64,
    /// Sprint race points scored (zero on regular weekends).
    #[serde(default)]
    pub sprint_points: f64,
    #[serde(default)]
    pub did_not_start: bool,
    #[serde(default)]
    pub did_not_finish: bool,
}

/// One team's aggregated points for a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRaceResult {
    pub team: String,
    #[serde(default)]
    pub race_points: f64,
    #[serde(default)]
    pub sprint_points: f64,
    #[serde(default)]
    pub total_points: f64,
}

/// Full result sheet for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub season: u16,
    pub round: u8,
    #[serde(default)]
    pub is_sprint_weekend: bool,
    #[serde(default)]
    pub driver_results: Vec<DriverRaceResult>,
    #[serde(default)]
    pub team_results: Vec<TeamRaceResult>,
}

impl RaceResult {
    /// Number of drivers entered in the round.
    pub fn grid_size(&self) -> u32 {
        self.driver_results.len() as u32
    }

    /// Position of the last classified driver, if anyone was classified.
    pub fn last_classified_position(&self) -> Option<u32> {
        self.driver_results.iter().filter_map(|r| r.position).max()
    }
}
