//! # fp_core - Deterministic Fantasy F1 Scoring Engine
//!
//! Card-effects and scoring engine for a fantasy Formula 1 game: given a
//! user's driver/team selection, a round's race result and an optional
//! pair of activated power cards, compute the final point total with a
//! full breakdown.
//!
//! ## Features
//! - 100% deterministic scoring (same inputs + seed = same breakdown)
//! - Closed, strongly-typed card effect set (no stringly-typed payloads)
//! - Tolerant of incomplete race data: missing rows score zero, a bad
//!   card never aborts a scoring pass
//! - JSON API for easy integration with the service layer

pub mod api;
pub mod catalog;
pub mod effects;
pub mod error;
pub mod lookup;
pub mod models;
pub mod ports;
pub mod scoring;

// Re-export main API functions
pub use api::{score_race_json, ScoreRequest, ScoreResponse};
pub use error::{Result, ScoringError};

// Re-export the engine entry points
pub use effects::{
    apply_driver_card_effect, apply_team_card_effect, DriverCardApplication, DriverCardParams,
    TeamCardApplication, TeamCardParams,
};
pub use scoring::{calculate_race_points, cards_eligible, CARDS_FIRST_SEASON};

// Re-export domain types
pub use models::{
    BonusAmount, BonusCondition, Card, CardEffect, CardEffectOutcome, CardKind, CardTier,
    DriverRaceResult, RaceCardSelection, RaceResult, RaceScore, ScoreBreakdown, Selection,
    TeamRaceResult,
};

// Re-export collaborator contracts and defaults
pub use catalog::{card_by_name, driver_cards, team_cards, EmbeddedCardPool, StaticRoster};
pub use ports::{
    CardPool, NameNormalizer, NoPlayerScores, PlayerRoundScore, PlayerScoreLookup, RosterLookup,
    ScoringContext, TeamScoreLookup,
};
