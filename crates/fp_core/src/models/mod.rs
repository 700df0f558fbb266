pub mod breakdown;
pub mod card;
pub mod points;
pub mod race_result;
pub mod selection;

pub use breakdown::{CardEffectOutcome, RaceScore, ScoreBreakdown};
pub use card::{
    effect_or_unknown, BonusAmount, BonusCondition, Card, CardEffect, CardKind, CardTier,
    TargetKind,
};
pub use points::{grand_prix_points, GRAND_PRIX_POINTS};
pub use race_result::{DriverRaceResult, RaceResult, TeamRaceResult};
pub use selection::{RaceCardSelection, Selection};
