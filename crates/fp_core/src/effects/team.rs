//! Team-card effect resolver.
//!
//! Mirrors the driver resolver but operates on one aggregated team score.
//! Same degradation rules: missing targets, unmet conditions, and
//! wrong-side or unknown effects all become described no-ops.

use rand::Rng;
use tracing::debug;

use crate::lookup::find_driver_result;
use crate::models::{
    grand_prix_points, BonusAmount, BonusCondition, Card, CardEffect, CardEffectOutcome, CardKind,
    RaceCardSelection, RaceResult, Selection,
};
use crate::ports::ScoringContext;

/// Inputs for one team-card application.
pub struct TeamCardParams<'a> {
    pub card: &'a Card,
    pub base_team_points: f64,
    pub selection: &'a Selection,
    pub card_selection: &'a RaceCardSelection,
    pub race: &'a RaceResult,
}

/// Post-card team points plus the effect record.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamCardApplication {
    pub team_points: f64,
    pub effect: CardEffectOutcome,
}

/// Apply a team card. Entry point for the orchestrator; also callable
/// directly by the API layer.
pub fn apply_team_card_effect<R: Rng>(
    ctx: &ScoringContext,
    params: &TeamCardParams,
    rng: &mut R,
) -> TeamCardApplication {
    // Random resolves to a substitute exactly once, like Mystery on the
    // driver side: stored transformation first, otherwise one pool draw.
    let resolved;
    let (effect_card, via_random): (&Card, bool) = match &params.card.effect {
        CardEffect::Random => {
            if let Some(stored) = &params.card_selection.random_transformed_card {
                (stored, true)
            } else {
                let pool = ctx.card_pool.substitutes(CardKind::Team);
                if pool.is_empty() {
                    return TeamCardApplication {
                        team_points: params.base_team_points,
                        effect: CardEffectOutcome::not_applied(
                            params.card,
                            "Random could not resolve: substitute pool is empty",
                        ),
                    };
                }
                resolved = pool[rng.gen_range(0..pool.len())].clone();
                debug!(card = %resolved.name, "random card resolved from pool");
                (&resolved, true)
            }
        }
        _ => (params.card, false),
    };

    let mut application = apply_resolved(ctx, params, effect_card);

    if via_random {
        application.effect.card_name = params.card.name.clone();
        application.effect.card_tier = params.card.tier;
        application.effect.description = format!(
            "Random resolved to '{}': {}",
            effect_card.name, application.effect.description
        );
        application.effect.resolved_card = Some(effect_card.clone());
    }

    application
}

fn unchanged(params: &TeamCardParams, effect: CardEffectOutcome) -> TeamCardApplication {
    TeamCardApplication { team_points: params.base_team_points, effect }
}

/// Classified positions of the selected team's two drivers, by roster.
fn team_driver_positions(
    ctx: &ScoringContext,
    params: &TeamCardParams,
) -> Vec<(String, Option<u32>)> {
    let Some(team) = ctx.normalizer.normalize_team(&params.selection.team) else {
        return Vec::new();
    };
    ctx.roster
        .team_drivers(&team)
        .into_iter()
        .map(|driver| {
            let position =
                find_driver_result(ctx.normalizer, &driver, &params.race.driver_results)
                    .and_then(|r| r.position);
            (driver, position)
        })
        .collect()
}

fn apply_resolved(
    ctx: &ScoringContext,
    params: &TeamCardParams,
    card: &Card,
) -> TeamCardApplication {
    let team = params.selection.team.as_str();
    let base = params.base_team_points;

    match &card.effect {
        CardEffect::Espionage => {
            let Some(target) = params.card_selection.target_team.as_deref() else {
                return unchanged(
                    params,
                    CardEffectOutcome::not_applied(card, "Espionage activated without a target team"),
                );
            };
            match ctx
                .team_scores
                .team_round_total(target, params.race.season, params.race.round)
            {
                Some(total) => TeamCardApplication {
                    team_points: total,
                    effect: CardEffectOutcome::applied(
                        card,
                        format!("{team} scores {target}'s round total instead: {total} points"),
                    ),
                },
                None => TeamCardApplication {
                    team_points: 0.0,
                    effect: CardEffectOutcome::applied(
                        card,
                        format!("{target} has no result this round, espionage yields 0 points"),
                    ),
                },
            }
        }

        CardEffect::Podium { points_per_podium, max_points } => {
            let podiums = team_driver_positions(ctx, params)
                .iter()
                .filter(|(_, position)| position.is_some_and(|p| p <= 3))
                .count();
            if podiums == 0 {
                return unchanged(
                    params,
                    CardEffectOutcome::not_applied(card, format!("{team} had no podium finish")),
                );
            }
            let bonus = (podiums as f64 * points_per_podium).min(*max_points);
            TeamCardApplication {
                team_points: base + bonus,
                effect: CardEffectOutcome::applied(
                    card,
                    format!("{team} took {podiums} podium(s): +{bonus} bonus points"),
                ),
            }
        }

        CardEffect::ConditionalBonus { condition, bonus } => {
            apply_conditional(ctx, params, card, *condition, *bonus)
        }

        CardEffect::Undercut => apply_undercut(ctx, params, card),

        CardEffect::Mystery | CardEffect::Random => unchanged(
            params,
            CardEffectOutcome::not_applied(card, "unresolved substitution card, no effect"),
        ),

        CardEffect::Multiply { .. }
        | CardEffect::Mirror
        | CardEffect::Switcheroo
        | CardEffect::TeamworkAdd
        | CardEffect::TeamworkSwap
        | CardEffect::PositionAdjust { .. }
        | CardEffect::FlatBonus { .. } => unchanged(
            params,
            CardEffectOutcome::not_applied(
                card,
                format!("'{}' is a driver-side effect, not applicable to a team slot", card.effect.tag()),
            ),
        ),

        CardEffect::Unknown { raw } => unchanged(
            params,
            CardEffectOutcome::not_applied(card, format!("unrecognized effect type '{raw}'")),
        ),
    }
}

fn apply_conditional(
    ctx: &ScoringContext,
    params: &TeamCardParams,
    card: &Card,
    condition: BonusCondition,
    bonus: BonusAmount,
) -> TeamCardApplication {
    let team = params.selection.team.as_str();
    let base = params.base_team_points;

    // Sponsors pays off the base score itself, no positions needed.
    if condition == BonusCondition::Sponsors {
        let BonusAmount::Sponsors { zero, one } = bonus else {
            return unchanged(
                params,
                CardEffectOutcome::not_applied(card, "malformed bonus payload for the sponsors condition"),
            );
        };
        let amount = if base == 0.0 {
            Some(zero)
        } else if base == 1.0 {
            Some(one)
        } else {
            None
        };
        return match amount {
            Some(amount) => TeamCardApplication {
                team_points: base + amount,
                effect: CardEffectOutcome::applied(
                    card,
                    format!("{team} scored {base}, sponsors chip in +{amount} points"),
                ),
            },
            None => unchanged(
                params,
                CardEffectOutcome::not_applied(
                    card,
                    format!("{team} scored {base}, sponsors only pay on 0 or 1"),
                ),
            ),
        };
    }

    let BonusAmount::Flat(amount) = bonus else {
        return unchanged(
            params,
            CardEffectOutcome::not_applied(card, "malformed bonus payload for a team condition"),
        );
    };

    let drivers = team_driver_positions(ctx, params);
    if drivers.len() < 2 {
        return unchanged(
            params,
            CardEffectOutcome::not_applied(card, format!("{team} has no full driver pairing on the roster")),
        );
    }
    let positions: Vec<Option<u32>> = drivers.iter().map(|(_, p)| *p).collect();
    let grid = params.race.grid_size();
    let last = params.race.last_classified_position();

    let met = match condition {
        BonusCondition::BothTop5 => positions.iter().all(|p| p.is_some_and(|p| p <= 5)),
        BonusCondition::BothTop10 => positions.iter().all(|p| p.is_some_and(|p| p <= 10)),
        BonusCondition::BothOutsidePoints => {
            positions.iter().all(|p| p.map_or(true, |p| p > 10))
        }
        BonusCondition::OneLastPlace => {
            last.is_some() && positions.iter().any(|p| *p == last)
        }
        BonusCondition::BothBottom5 => {
            grid >= 5 && positions.iter().all(|p| p.is_some_and(|p| p > grid - 5))
        }
        // Driver-side condition on a team card: malformed seed data.
        _ => {
            return unchanged(
                params,
                CardEffectOutcome::not_applied(
                    card,
                    format!("condition '{condition:?}' is not valid for a team card"),
                ),
            );
        }
    };

    if met {
        TeamCardApplication {
            team_points: base + amount,
            effect: CardEffectOutcome::applied(
                card,
                format!("{team} met the condition, +{amount} bonus points"),
            ),
        }
    } else {
        unchanged(
            params,
            CardEffectOutcome::not_applied(card, format!("{team} did not meet the condition, no bonus")),
        )
    }
}

/// The worse-placed teammate is reclassified to one position behind the
/// better-placed one (clamped to the grid size) and the team is rescored:
/// the worse driver's original points come out, the shifted position's
/// table points go in.
fn apply_undercut(
    ctx: &ScoringContext,
    params: &TeamCardParams,
    card: &Card,
) -> TeamCardApplication {
    let team = params.selection.team.as_str();
    let drivers = team_driver_positions(ctx, params);

    let mut classified: Vec<(&str, u32)> = drivers
        .iter()
        .filter_map(|(driver, position)| position.map(|p| (driver.as_str(), p)))
        .collect();
    if classified.len() < 2 {
        return unchanged(
            params,
            CardEffectOutcome::not_applied(
                card,
                format!("{team} needs both drivers classified for an undercut"),
            ),
        );
    }
    classified.sort_by_key(|(_, position)| *position);
    let (better_driver, better_position) = classified[0];
    let (worse_driver, worse_position) = classified[1];

    let worse_points = find_driver_result(ctx.normalizer, worse_driver, &params.race.driver_results)
        .map(|r| r.points)
        .unwrap_or(0.0);

    // Both teammates are classified, so one place behind the better driver
    // can never run past the end of the classification. Clamping to the row
    // count would misfire on partial result sheets.
    let last = params.race.last_classified_position().unwrap_or(worse_position);
    let new_position = (better_position + 1).min(last);
    let new_points = grand_prix_points(new_position);
    let team_points = params.base_team_points - worse_points + new_points;

    TeamCardApplication {
        team_points,
        effect: CardEffectOutcome::applied(
            card,
            format!(
                "{worse_driver} undercuts from P{worse_position} to P{new_position} behind {better_driver}: \
                 team rescored to {team_points} points"
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EmbeddedCardPool, StaticRoster};
    use crate::lookup::RaceResultTeamScores;
    use crate::models::{CardTier, DriverRaceResult, TeamRaceResult};
    use crate::ports::NoPlayerScores;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn row(driver: &str, position: u32, points: f64) -> DriverRaceResult {
        DriverRaceResult {
            driver: driver.to_string(),
            position: Some(position),
            points,
            sprint_points: 0.0,
            did_not_start: false,
            did_not_finish: false,
        }
    }

    fn race(rows: Vec<DriverRaceResult>, teams: Vec<TeamRaceResult>) -> RaceResult {
        RaceResult {
            season: 2026,
            round: 3,
            is_sprint_weekend: false,
            driver_results: rows,
            team_results: teams,
        }
    }

    fn selection() -> Selection {
        Selection {
            main_driver: "C. Leclerc".to_string(),
            reserve_driver: "A. Albon".to_string(),
            team: "Ferrari".to_string(),
            round: Some(3),
            league_id: Some("league-1".to_string()),
            user_id: Some("user-1".to_string()),
        }
    }

    fn apply(
        race: &RaceResult,
        card: Card,
        card_selection: RaceCardSelection,
        base_team: f64,
    ) -> TeamCardApplication {
        let team_scores = RaceResultTeamScores::new(race, &StaticRoster);
        let ctx = ScoringContext {
            normalizer: &StaticRoster,
            roster: &StaticRoster,
            player_scores: &NoPlayerScores,
            team_scores: &team_scores,
            card_pool: &EmbeddedCardPool,
        };
        let sel = selection();
        let params = TeamCardParams {
            card: &card,
            base_team_points: base_team,
            selection: &sel,
            card_selection: &card_selection,
            race,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        apply_team_card_effect(&ctx, &params, &mut rng)
    }

    #[test]
    fn test_podium_bonus_is_capped() {
        // Leclerc P2, Hamilton P3: both podiums. 2 x 8 = 16, cap 16.
        let race = race(vec![row("C. Leclerc", 2, 18.0), row("L. Hamilton", 3, 15.0)], vec![]);
        let card = Card::team("Podium Party", CardTier::Gold, 3, CardEffect::Podium {
            points_per_podium: 8.0,
            max_points: 16.0,
        });
        let result = apply(&race, card, RaceCardSelection::default(), 33.0);
        assert_eq!(result.team_points, 49.0);
        assert!(result.effect.effect_applied);
    }

    #[test]
    fn test_podium_no_podium_is_noop() {
        let race = race(vec![row("C. Leclerc", 4, 12.0), row("L. Hamilton", 6, 8.0)], vec![]);
        let card = Card::team("Podium Party", CardTier::Gold, 3, CardEffect::Podium {
            points_per_podium: 8.0,
            max_points: 16.0,
        });
        let result = apply(&race, card, RaceCardSelection::default(), 20.0);
        assert_eq!(result.team_points, 20.0);
        assert!(!result.effect.effect_applied);
    }

    #[test]
    fn test_sponsors_split() {
        let race = race(vec![], vec![]);
        let card = || {
            Card::team(
                "Sponsors",
                CardTier::Silver,
                2,
                CardEffect::ConditionalBonus {
                    condition: BonusCondition::Sponsors,
                    bonus: BonusAmount::Sponsors { zero: 5.0, one: 1.0 },
                },
            )
        };
        let result = apply(&race, card(), RaceCardSelection::default(), 0.0);
        assert_eq!(result.team_points, 5.0);
        let result = apply(&race, card(), RaceCardSelection::default(), 1.0);
        assert_eq!(result.team_points, 2.0);
        let result = apply(&race, card(), RaceCardSelection::default(), 12.0);
        assert_eq!(result.team_points, 12.0);
        assert!(!result.effect.effect_applied);
    }

    #[test]
    fn test_espionage_takes_target_total() {
        let race = race(
            vec![],
            vec![TeamRaceResult {
                team: "McLaren".to_string(),
                race_points: 30.0,
                sprint_points: 0.0,
                total_points: 30.0,
            }],
        );
        let card = Card::team("Espionage", CardTier::Gold, 3, CardEffect::Espionage);
        let cards = RaceCardSelection {
            target_team: Some("McLaren F1 Team".to_string()),
            ..Default::default()
        };
        let result = apply(&race, card, cards, 8.0);
        assert_eq!(result.team_points, 30.0);
    }

    #[test]
    fn test_espionage_missing_target_scores_zero() {
        let race = race(vec![], vec![]);
        let card = Card::team("Espionage", CardTier::Gold, 3, CardEffect::Espionage);
        let cards = RaceCardSelection {
            target_team: Some("McLaren".to_string()),
            ..Default::default()
        };
        let result = apply(&race, card, cards, 8.0);
        assert_eq!(result.team_points, 0.0);
        assert!(result.effect.effect_applied);
    }

    #[test]
    fn test_both_top10_condition() {
        let card = || {
            Card::team(
                "Double Points Finish",
                CardTier::Silver,
                2,
                CardEffect::ConditionalBonus {
                    condition: BonusCondition::BothTop10,
                    bonus: BonusAmount::Flat(6.0),
                },
            )
        };
        let race_met = race(vec![row("C. Leclerc", 4, 12.0), row("L. Hamilton", 10, 1.0)], vec![]);
        let result = apply(&race_met, card(), RaceCardSelection::default(), 13.0);
        assert_eq!(result.team_points, 19.0);

        let race_unmet = race(vec![row("C. Leclerc", 4, 12.0), row("L. Hamilton", 11, 0.0)], vec![]);
        let result = apply(&race_unmet, card(), RaceCardSelection::default(), 12.0);
        assert_eq!(result.team_points, 12.0);
        assert!(!result.effect.effect_applied);
    }

    #[test]
    fn test_both_outside_points_counts_unclassified() {
        let card = Card::team(
            "Rebuild Year",
            CardTier::Bronze,
            1,
            CardEffect::ConditionalBonus {
                condition: BonusCondition::BothOutsidePoints,
                bonus: BonusAmount::Flat(4.0),
            },
        );
        let mut dnf = row("L. Hamilton", 0, 0.0);
        dnf.position = None;
        dnf.did_not_finish = true;
        let race = race(vec![row("C. Leclerc", 14, 0.0), dnf], vec![]);
        let result = apply(&race, card, RaceCardSelection::default(), 0.0);
        assert_eq!(result.team_points, 4.0);
    }

    #[test]
    fn test_one_last_place_condition() {
        let card = Card::team(
            "Wooden Spoon",
            CardTier::Bronze,
            1,
            CardEffect::ConditionalBonus {
                condition: BonusCondition::OneLastPlace,
                bonus: BonusAmount::Flat(3.0),
            },
        );
        let race = race(
            vec![row("C. Leclerc", 5, 10.0), row("L. Hamilton", 18, 0.0), row("A. Albon", 17, 0.0)],
            vec![],
        );
        let result = apply(&race, card, RaceCardSelection::default(), 10.0);
        assert_eq!(result.team_points, 13.0);
    }

    #[test]
    fn test_undercut_rescores_worse_driver() {
        // Leclerc P5 (10 pts), Hamilton P12 (0 pts) in a 20-car field.
        let mut rows = vec![row("C. Leclerc", 5, 10.0), row("L. Hamilton", 12, 0.0)];
        rows.extend((1..=18).map(|i| {
            // Fillers take every position except P5 and P12.
            let position = if i < 5 {
                i
            } else if i < 11 {
                i + 1
            } else {
                i + 2
            };
            row(&format!("Filler {i}"), position, 0.0)
        }));
        let race = race(rows, vec![]);
        let card = Card::team("Undercut", CardTier::Gold, 3, CardEffect::Undercut);
        let result = apply(&race, card, RaceCardSelection::default(), 10.0);
        // Hamilton reclassified to P6: 10 - 0 + 8 = 18.
        assert_eq!(result.team_points, 18.0);
        assert!(result.effect.description.contains("P6"));
    }

    #[test]
    fn test_undercut_clamps_to_last_classified() {
        // Two-car grid: better is P1, shifted position clamps to P2.
        let race = race(vec![row("C. Leclerc", 1, 25.0), row("L. Hamilton", 2, 18.0)], vec![]);
        let card = Card::team("Undercut", CardTier::Gold, 3, CardEffect::Undercut);
        let result = apply(&race, card, RaceCardSelection::default(), 43.0);
        // Worse already sits at P2: 43 - 18 + 18 = 43.
        assert_eq!(result.team_points, 43.0);
        assert!(result.effect.effect_applied);
    }

    #[test]
    fn test_undercut_on_partial_result_sheet() {
        // Only the two teammates are in the sheet. The shift must still land
        // at P6, one behind the better driver, not at a position derived from
        // the two-row count.
        let race = race(vec![row("C. Leclerc", 5, 10.0), row("L. Hamilton", 12, 0.0)], vec![]);
        let card = Card::team("Undercut", CardTier::Gold, 3, CardEffect::Undercut);
        let result = apply(&race, card, RaceCardSelection::default(), 10.0);
        // 10 - 0 + grand_prix_points(6) = 18.
        assert_eq!(result.team_points, 18.0);
        assert!(result.effect.description.contains("P6"));
    }

    #[test]
    fn test_undercut_needs_both_classified() {
        let race = race(vec![row("C. Leclerc", 5, 10.0)], vec![]);
        let card = Card::team("Undercut", CardTier::Gold, 3, CardEffect::Undercut);
        let result = apply(&race, card, RaceCardSelection::default(), 10.0);
        assert_eq!(result.team_points, 10.0);
        assert!(!result.effect.effect_applied);
    }

    #[test]
    fn test_random_prefers_stored_transformation() {
        let race = race(vec![], vec![]);
        let stored = Card::team(
            "Sponsors",
            CardTier::Silver,
            2,
            CardEffect::ConditionalBonus {
                condition: BonusCondition::Sponsors,
                bonus: BonusAmount::Sponsors { zero: 5.0, one: 1.0 },
            },
        );
        let cards = RaceCardSelection {
            random_transformed_card: Some(stored),
            ..Default::default()
        };
        let random = Card::team("Lucky Dip", CardTier::Gold, 3, CardEffect::Random);
        let a = apply(&race, random.clone(), cards.clone(), 0.0);
        let b = apply(&race, random, cards, 0.0);
        assert_eq!(a.team_points, 5.0);
        assert_eq!(a, b);
        assert_eq!(a.effect.card_name, "Lucky Dip");
        assert_eq!(a.effect.resolved_card.as_ref().unwrap().name, "Sponsors");
    }

    #[test]
    fn test_random_draw_is_seed_deterministic() {
        let race = race(vec![row("C. Leclerc", 2, 18.0), row("L. Hamilton", 3, 15.0)], vec![]);
        let random = Card::team("Lucky Dip", CardTier::Gold, 3, CardEffect::Random);
        let a = apply(&race, random.clone(), RaceCardSelection::default(), 33.0);
        let b = apply(&race, random, RaceCardSelection::default(), 33.0);
        assert_eq!(a, b);
        assert!(!a.effect.resolved_card.unwrap().effect.is_self_referential());
    }

    #[test]
    fn test_driver_side_effect_on_team_slot_is_noop() {
        let race = race(vec![], vec![]);
        let card = Card::driver("Double Down", CardTier::Gold, 3, CardEffect::Multiply { factor: 2.0 });
        let result = apply(&race, card, RaceCardSelection::default(), 21.0);
        assert_eq!(result.team_points, 21.0);
        assert!(!result.effect.effect_applied);
        assert!(result.effect.description.contains("driver-side"));
    }
}
