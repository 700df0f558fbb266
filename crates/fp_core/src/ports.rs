//! Injected collaborator contracts.
//!
//! The engine performs no I/O of its own. Everything it needs beyond the
//! per-call inputs — alias resolution, season rosters, other players'
//! scores, the card catalog — comes in through these traits, so the
//! resolvers stay free of persistence-layer dependencies and are trivially
//! testable with fakes.

use serde::{Deserialize, Serialize};

use crate::models::{Card, CardKind};

/// Alias resolution ("Checo" → "S. Perez"). Returns `None` for names the
/// season dictionary does not know; callers treat that as "not found",
/// never as an error.
pub trait NameNormalizer {
    fn normalize_driver(&self, raw: &str) -> Option<String>;
    fn normalize_team(&self, raw: &str) -> Option<String>;
}

/// Season roster: which team a driver races for and who its drivers are.
pub trait RosterLookup {
    fn driver_team(&self, driver: &str) -> Option<String>;
    /// Canonical driver names for a team, in no particular order.
    /// Empty when the team is unknown.
    fn team_drivers(&self, team: &str) -> Vec<String>;
}

/// Another player's already-computed driver points for a round. Consumed
/// by Mirror.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRoundScore {
    pub main_driver_points: f64,
    pub reserve_driver_points: f64,
}

/// Cross-player score access for Mirror.
///
/// Implementations own the "auto-assign a default selection" fallback for
/// players who have not picked yet; when that is not possible they return
/// `None` and the mirroring player scores zero from both slots.
pub trait PlayerScoreLookup {
    fn round_score(&self, user_id: &str, league_id: &str, round: u8) -> Option<PlayerRoundScore>;
}

/// Cross-team total access for Espionage. `None` when the target team has
/// no result for the round; the effect then scores zero.
pub trait TeamScoreLookup {
    fn team_round_total(&self, team: &str, season: u16, round: u8) -> Option<f64>;
}

/// Substitute pool for Mystery/Random resolution. Implementations must
/// exclude self-referential effects (Mystery never resolves to Mystery,
/// Random never to Random).
pub trait CardPool {
    fn substitutes(&self, kind: CardKind) -> Vec<Card>;
}

/// `PlayerScoreLookup` that knows no one. Used when scoring outside a
/// league context, where Mirror has nothing to copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlayerScores;

impl PlayerScoreLookup for NoPlayerScores {
    fn round_score(&self, _user_id: &str, _league_id: &str, _round: u8) -> Option<PlayerRoundScore> {
        None
    }
}

/// Bundle of collaborator handles passed through one scoring call.
pub struct ScoringContext<'a> {
    pub normalizer: &'a dyn NameNormalizer,
    pub roster: &'a dyn RosterLookup,
    pub player_scores: &'a dyn PlayerScoreLookup,
    pub team_scores: &'a dyn TeamScoreLookup,
    pub card_pool: &'a dyn CardPool,
}
