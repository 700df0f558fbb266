//! Season card catalog.
//!
//! The full set of power cards seeded for a season, built once at startup
//! and treated as immutable reference data afterwards. Tier and slot cost
//! mirror the deck-building rules; only `effect` matters to scoring.

use once_cell::sync::Lazy;

use crate::models::{BonusAmount, BonusCondition, Card, CardEffect, CardKind, CardTier};
use crate::ports::CardPool;

static DRIVER_CARDS: Lazy<Vec<Card>> = Lazy::new(build_driver_cards);
static TEAM_CARDS: Lazy<Vec<Card>> = Lazy::new(build_team_cards);

fn build_driver_cards() -> Vec<Card> {
    vec![
        Card::driver("Double Down", CardTier::Gold, 3, CardEffect::Multiply { factor: 2.0 }),
        Card::driver("Mirror", CardTier::Gold, 3, CardEffect::Mirror),
        Card::driver("Switcheroo", CardTier::Gold, 3, CardEffect::Switcheroo),
        Card::driver("Teamwork 2.0", CardTier::Gold, 3, CardEffect::TeamworkAdd),
        Card::driver("Teamwork", CardTier::Silver, 2, CardEffect::TeamworkSwap),
        Card::driver("Slipstream", CardTier::Silver, 2, CardEffect::PositionAdjust { places: 1 }),
        Card::driver("DRS Train", CardTier::Gold, 3, CardEffect::PositionAdjust { places: 2 }),
        Card::driver("Mystery Box", CardTier::Gold, 3, CardEffect::Mystery),
        Card::driver(
            "Podium Push",
            CardTier::Silver,
            2,
            CardEffect::ConditionalBonus {
                condition: BonusCondition::Top5,
                bonus: BonusAmount::Flat(5.0),
            },
        ),
        Card::driver(
            "Points Finish",
            CardTier::Bronze,
            1,
            CardEffect::ConditionalBonus {
                condition: BonusCondition::Top10,
                bonus: BonusAmount::Flat(3.0),
            },
        ),
        Card::driver(
            "Intra-Team Battle",
            CardTier::Silver,
            2,
            CardEffect::ConditionalBonus {
                condition: BonusCondition::AheadOfTeammate,
                bonus: BonusAmount::Flat(4.0),
            },
        ),
        Card::driver(
            "Damage Limitation",
            CardTier::Bronze,
            1,
            CardEffect::ConditionalBonus {
                condition: BonusCondition::Bottom5,
                bonus: BonusAmount::Flat(2.0),
            },
        ),
        Card::driver("Sponsor Exposure", CardTier::Bronze, 1, CardEffect::FlatBonus {
            amount: 3.0,
        }),
    ]
}

fn build_team_cards() -> Vec<Card> {
    vec![
        Card::team("Espionage", CardTier::Gold, 3, CardEffect::Espionage),
        Card::team("Podium Party", CardTier::Gold, 3, CardEffect::Podium {
            points_per_podium: 8.0,
            max_points: 16.0,
        }),
        Card::team("Undercut", CardTier::Gold, 3, CardEffect::Undercut),
        Card::team("Lucky Dip", CardTier::Gold, 3, CardEffect::Random),
        Card::team(
            "Front Row Lockout",
            CardTier::Gold,
            3,
            CardEffect::ConditionalBonus {
                condition: BonusCondition::BothTop5,
                bonus: BonusAmount::Flat(10.0),
            },
        ),
        Card::team(
            "Double Points Finish",
            CardTier::Silver,
            2,
            CardEffect::ConditionalBonus {
                condition: BonusCondition::BothTop10,
                bonus: BonusAmount::Flat(6.0),
            },
        ),
        Card::team(
            "Rebuild Year",
            CardTier::Bronze,
            1,
            CardEffect::ConditionalBonus {
                condition: BonusCondition::BothOutsidePoints,
                bonus: BonusAmount::Flat(4.0),
            },
        ),
        Card::team(
            "Wooden Spoon",
            CardTier::Bronze,
            1,
            CardEffect::ConditionalBonus {
                condition: BonusCondition::OneLastPlace,
                bonus: BonusAmount::Flat(3.0),
            },
        ),
        Card::team(
            "Tail Enders",
            CardTier::Bronze,
            1,
            CardEffect::ConditionalBonus {
                condition: BonusCondition::BothBottom5,
                bonus: BonusAmount::Flat(5.0),
            },
        ),
        Card::team(
            "Sponsors",
            CardTier::Silver,
            2,
            CardEffect::ConditionalBonus {
                condition: BonusCondition::Sponsors,
                bonus: BonusAmount::Sponsors { zero: 5.0, one: 1.0 },
            },
        ),
    ]
}

/// All driver-side cards for the season.
pub fn driver_cards() -> &'static [Card] {
    &DRIVER_CARDS
}

/// All team-side cards for the season.
pub fn team_cards() -> &'static [Card] {
    &TEAM_CARDS
}

/// Look up a card by kind and name. Names are unique within a kind.
pub fn card_by_name(kind: CardKind, name: &str) -> Option<&'static Card> {
    let cards = match kind {
        CardKind::Driver => driver_cards(),
        CardKind::Team => team_cards(),
    };
    cards.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// [`CardPool`] over the embedded catalog, pre-filtered so Mystery/Random
/// can never draw themselves back.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCardPool;

impl CardPool for EmbeddedCardPool {
    fn substitutes(&self, kind: CardKind) -> Vec<Card> {
        let cards = match kind {
            CardKind::Driver => driver_cards(),
            CardKind::Team => team_cards(),
        };
        cards
            .iter()
            .filter(|c| !c.effect.is_self_referential())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_unique_within_kind() {
        for cards in [driver_cards(), team_cards()] {
            for (i, a) in cards.iter().enumerate() {
                for b in &cards[i + 1..] {
                    assert_ne!(
                        a.name.to_ascii_lowercase(),
                        b.name.to_ascii_lowercase(),
                        "duplicate card name {}",
                        a.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_kinds_are_consistent() {
        assert!(driver_cards().iter().all(|c| c.kind == CardKind::Driver));
        assert!(team_cards().iter().all(|c| c.kind == CardKind::Team));
    }

    #[test]
    fn test_substitute_pools_exclude_self_referential() {
        let pool = EmbeddedCardPool;
        assert!(pool
            .substitutes(CardKind::Driver)
            .iter()
            .all(|c| !c.effect.is_self_referential()));
        assert!(pool
            .substitutes(CardKind::Team)
            .iter()
            .all(|c| !c.effect.is_self_referential()));
        // Pools must be non-empty or Mystery/Random could never resolve.
        assert!(!pool.substitutes(CardKind::Driver).is_empty());
        assert!(!pool.substitutes(CardKind::Team).is_empty());
    }

    #[test]
    fn test_card_by_name_is_case_insensitive() {
        assert!(card_by_name(CardKind::Driver, "double down").is_some());
        assert!(card_by_name(CardKind::Team, "ESPIONAGE").is_some());
        assert!(card_by_name(CardKind::Driver, "Espionage").is_none());
    }
}
