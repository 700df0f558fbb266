//! User picks for a round: the driver/team selection and the optional
//! card activation record attached to it.

use serde::{Deserialize, Serialize};

use super::card::Card;

/// One user's pick for one round. Names are free-form user input; the
/// lookup layer normalizes them against the season roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub main_driver: String,
    pub reserve_driver: String,
    pub team: String,
    /// Round/league/user identifiers, present when the pick came from a
    /// league context. Needed for cross-player effects (Mirror).
    #[serde(default)]
    pub round: Option<u8>,
    #[serde(default)]
    pub league_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Card activation record for one selection.
///
/// `mystery_transformed_card` / `random_transformed_card` hold the
/// substitute drawn at activation time. Once stored, every recomputation
/// for this round must reuse them; the resolvers only draw fresh when the
/// stored slot is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceCardSelection {
    #[serde(default)]
    pub driver_card: Option<Card>,
    #[serde(default)]
    pub team_card: Option<Card>,
    /// Mirror target.
    #[serde(default)]
    pub target_player: Option<String>,
    /// Switcheroo target.
    #[serde(default)]
    pub target_driver: Option<String>,
    /// Espionage target.
    #[serde(default)]
    pub target_team: Option<String>,
    #[serde(default)]
    pub mystery_transformed_card: Option<Card>,
    #[serde(default)]
    pub random_transformed_card: Option<Card>,
}
