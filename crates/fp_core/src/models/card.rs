//! Power card definitions.
//!
//! Cards are read-only reference data seeded once per season. A card's
//! gameplay behavior lives entirely in its [`CardEffect`]; tier and slot
//! cost are deck-building metadata and never enter the scoring math.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Which selection slot a card attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Driver,
    Team,
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CardKind::Driver => write!(f, "driver"),
            CardKind::Team => write!(f, "team"),
        }
    }
}

/// Cosmetic/cost grouping. Has no effect on scoring math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTier {
    Gold,
    Silver,
    Bronze,
}

/// Condition key for `conditional_bonus` effects, driver and team side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusCondition {
    // Driver-side conditions
    Top5,
    Top10,
    AheadOfTeammate,
    Bottom5,
    // Team-side conditions
    BothTop5,
    BothTop10,
    BothOutsidePoints,
    OneLastPlace,
    BothBottom5,
    Sponsors,
}

/// Bonus payload for `conditional_bonus`. Most conditions carry a flat
/// amount; `sponsors` carries a split depending on the base team score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BonusAmount {
    Flat(f64),
    Sponsors { zero: f64, one: f64 },
}

fn default_multiply_factor() -> f64 {
    2.0
}

fn default_adjust_places() -> u32 {
    1
}

fn default_flat_bonus() -> f64 {
    3.0
}

/// Closed set of card behaviors, one variant per effect kind.
///
/// The wire tags match the seeded card documents; unrecognized tags are
/// mapped to [`CardEffect::Unknown`] at the deserialization boundary (see
/// [`effect_or_unknown`]) so that a stale card document can never abort a
/// scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardEffect {
    /// Active driver's points × `factor`.
    Multiply {
        #[serde(default = "default_multiply_factor")]
        factor: f64,
    },
    /// Replace both driver slots with the target player's round score.
    Mirror,
    /// Replace active driver's points with the target driver's result.
    Switcheroo,
    /// Active driver's points + teammate's points.
    #[serde(rename = "teamwork2")]
    TeamworkAdd,
    /// Replace active driver's points with the teammate's points.
    #[serde(rename = "teamwork")]
    TeamworkSwap,
    /// Shift the active driver's finishing position up by `places`
    /// (floored at P1) and rescore from the grand prix points table.
    PositionAdjust {
        #[serde(default = "default_adjust_places")]
        places: u32,
    },
    /// Resolves to another driver card at activation time.
    Mystery,
    /// Conditional flat bonus, driver or team side depending on the
    /// condition key.
    ConditionalBonus {
        condition: BonusCondition,
        bonus: BonusAmount,
    },
    /// Unconditional flat bonus.
    FlatBonus {
        #[serde(default = "default_flat_bonus")]
        amount: f64,
    },
    /// Replace team points with the target team's round total.
    Espionage,
    /// Bonus per podium finish by the selected team's drivers, capped.
    Podium {
        points_per_podium: f64,
        max_points: f64,
    },
    /// Reclassify the worse-placed teammate to one position behind the
    /// better-placed one and rescore the team.
    Undercut,
    /// Resolves to another team card at activation time.
    Random,
    /// Catch-all for effect tags this build does not know. Never seeded;
    /// only produced when deserializing foreign card documents.
    Unknown { raw: String },
}

impl CardEffect {
    /// Mystery/Random resolve through the card pool; they must never be
    /// drawn back out of it.
    pub fn is_self_referential(&self) -> bool {
        matches!(self, CardEffect::Mystery | CardEffect::Random)
    }

    /// Short tag used in effect descriptions and logs.
    pub fn tag(&self) -> &str {
        match self {
            CardEffect::Multiply { .. } => "multiply",
            CardEffect::Mirror => "mirror",
            CardEffect::Switcheroo => "switcheroo",
            CardEffect::TeamworkAdd => "teamwork2",
            CardEffect::TeamworkSwap => "teamwork",
            CardEffect::PositionAdjust { .. } => "position_adjust",
            CardEffect::Mystery => "mystery",
            CardEffect::ConditionalBonus { .. } => "conditional_bonus",
            CardEffect::FlatBonus { .. } => "flat_bonus",
            CardEffect::Espionage => "espionage",
            CardEffect::Podium { .. } => "podium",
            CardEffect::Undercut => "undercut",
            CardEffect::Random => "random",
            CardEffect::Unknown { raw } => raw,
        }
    }
}

/// Deserialize a [`CardEffect`], folding unrecognized or malformed effect
/// documents into [`CardEffect::Unknown`] instead of failing the whole
/// containing record.
pub fn effect_or_unknown<'de, D>(deserializer: D) -> Result<CardEffect, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match serde_json::from_value::<CardEffect>(value.clone()) {
        Ok(effect) => Ok(effect),
        Err(_) => {
            let raw = value
                .get("type")
                .and_then(|v| v.as_str())
                .unwrap_or("<missing effect tag>")
                .to_string();
            Ok(CardEffect::Unknown { raw })
        }
    }
}

/// One card definition from the season catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub kind: CardKind,
    pub tier: CardTier,
    /// Deck-building constraint only.
    pub slot_cost: u8,
    #[serde(deserialize_with = "effect_or_unknown")]
    pub effect: CardEffect,
}

impl Card {
    pub fn driver(name: &str, tier: CardTier, slot_cost: u8, effect: CardEffect) -> Self {
        Self { name: name.to_string(), kind: CardKind::Driver, tier, slot_cost, effect }
    }

    pub fn team(name: &str, tier: CardTier, slot_cost: u8, effect: CardEffect) -> Self {
        Self { name: name.to_string(), kind: CardKind::Team, tier, slot_cost, effect }
    }

    /// Whether activating this card must supply a target, and of what kind.
    pub fn required_target(&self) -> Option<TargetKind> {
        match self.effect {
            CardEffect::Mirror => Some(TargetKind::Player),
            CardEffect::Switcheroo => Some(TargetKind::Driver),
            CardEffect::Espionage => Some(TargetKind::Team),
            _ => None,
        }
    }
}

/// What a targeted card points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Player,
    Driver,
    Team,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TargetKind::Player => write!(f, "target_player"),
            TargetKind::Driver => write!(f, "target_driver"),
            TargetKind::Team => write!(f, "target_team"),
        }
    }
}
