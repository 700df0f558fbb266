//! Scoring output: the final total plus every intermediate value, so the
//! front-end can show users exactly how a score came together.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardTier};

/// What a single card did (or did not do) to the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardEffectOutcome {
    pub card_name: String,
    pub card_tier: CardTier,
    /// False when the effect's condition was unmet, the target was
    /// missing, or the effect was unrecognized.
    pub effect_applied: bool,
    pub description: String,
    /// For Mystery/Random: the substitute the card resolved to. Callers
    /// persist this so recomputation never re-rolls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_card: Option<Card>,
}

impl CardEffectOutcome {
    pub fn applied(card: &Card, description: impl Into<String>) -> Self {
        Self {
            card_name: card.name.clone(),
            card_tier: card.tier,
            effect_applied: true,
            description: description.into(),
            resolved_card: None,
        }
    }

    pub fn not_applied(card: &Card, description: impl Into<String>) -> Self {
        Self {
            card_name: card.name.clone(),
            card_tier: card.tier,
            effect_applied: false,
            description: description.into(),
            resolved_card: None,
        }
    }
}

/// Full scoring breakdown for one selection in one round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base_main_driver_points: f64,
    pub base_reserve_driver_points: f64,
    pub base_team_points: f64,
    /// Post-card values. Equal to the base values when no card applied.
    pub main_driver_points: f64,
    pub reserve_driver_points: f64,
    pub team_points: f64,
    /// Season/sprint gate verdict for this round.
    pub cards_eligible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_card_effect: Option<CardEffectOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_card_effect: Option<CardEffectOutcome>,
}

/// Engine output: the sum plus its breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceScore {
    pub total_points: f64,
    pub breakdown: ScoreBreakdown,
}
