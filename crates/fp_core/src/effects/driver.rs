//! Driver-card effect resolver.
//!
//! Given the base driver points and a resolved card, computes the modified
//! main/reserve points and a human-readable effect record. Every branch
//! that cannot apply (missing target, unmet condition, malformed payload,
//! effect from the wrong side of the catalog) degrades to a described
//! no-op; nothing in here aborts a scoring pass.

use rand::Rng;
use tracing::debug;

use crate::lookup::{find_driver_result, teammate_of};
use crate::models::{
    grand_prix_points, BonusAmount, BonusCondition, Card, CardEffect, CardEffectOutcome, CardKind,
    RaceCardSelection, RaceResult, Selection,
};
use crate::ports::ScoringContext;

/// Inputs for one driver-card application.
pub struct DriverCardParams<'a> {
    pub card: &'a Card,
    pub base_main_points: f64,
    pub base_reserve_points: f64,
    pub selection: &'a Selection,
    pub card_selection: &'a RaceCardSelection,
    pub race: &'a RaceResult,
}

/// Post-card driver points plus the effect record.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverCardApplication {
    pub main_driver_points: f64,
    pub reserve_driver_points: f64,
    pub effect: CardEffectOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveSlot {
    Main,
    Reserve,
}

/// Which slot the card acts on. A main driver who did not start cannot
/// receive a bonus; on a regular weekend the reserve who actually raced
/// takes their place. Sprint weekends never shift the slot (the reserve
/// scores independently there).
fn active_slot(params: &DriverCardParams) -> ActiveSlot {
    if !params.race.is_sprint_weekend
        && params.base_main_points == 0.0
        && params.base_reserve_points > 0.0
    {
        ActiveSlot::Reserve
    } else {
        ActiveSlot::Main
    }
}

/// Apply a driver card. Entry point for the orchestrator; also callable
/// directly by the API layer.
pub fn apply_driver_card_effect<R: Rng>(
    ctx: &ScoringContext,
    params: &DriverCardParams,
    rng: &mut R,
) -> DriverCardApplication {
    let slot = active_slot(params);

    // Mystery resolves to a substitute exactly once: the stored
    // transformation when present, otherwise one draw from the pool.
    let resolved;
    let (effect_card, via_mystery): (&Card, bool) = match &params.card.effect {
        CardEffect::Mystery => {
            if let Some(stored) = &params.card_selection.mystery_transformed_card {
                (stored, true)
            } else {
                let pool = ctx.card_pool.substitutes(CardKind::Driver);
                if pool.is_empty() {
                    return unchanged(
                        params,
                        CardEffectOutcome::not_applied(
                            params.card,
                            "Mystery could not resolve: substitute pool is empty",
                        ),
                    );
                }
                resolved = pool[rng.gen_range(0..pool.len())].clone();
                debug!(card = %resolved.name, "mystery card resolved from pool");
                (&resolved, true)
            }
        }
        _ => (params.card, false),
    };

    let mut application = apply_resolved(ctx, params, effect_card, slot);

    if via_mystery {
        // Report under the activated card's identity, expose the draw.
        application.effect.card_name = params.card.name.clone();
        application.effect.card_tier = params.card.tier;
        application.effect.description = format!(
            "Mystery resolved to '{}': {}",
            effect_card.name, application.effect.description
        );
        application.effect.resolved_card = Some(effect_card.clone());
    }

    application
}

/// Teammate's canonical name and race points. Points are zero when the
/// teammate is rostered but absent from the results.
fn teammate_points(
    ctx: &ScoringContext,
    params: &DriverCardParams,
    active_driver: &str,
) -> Option<(String, f64)> {
    let teammate = teammate_of(ctx.normalizer, ctx.roster, active_driver)?;
    let points = find_driver_result(ctx.normalizer, &teammate, &params.race.driver_results)
        .map(|r| r.points)
        .unwrap_or(0.0);
    Some((teammate, points))
}

fn unchanged(params: &DriverCardParams, effect: CardEffectOutcome) -> DriverCardApplication {
    DriverCardApplication {
        main_driver_points: params.base_main_points,
        reserve_driver_points: params.base_reserve_points,
        effect,
    }
}

fn apply_resolved(
    ctx: &ScoringContext,
    params: &DriverCardParams,
    card: &Card,
    slot: ActiveSlot,
) -> DriverCardApplication {
    let active_driver = match slot {
        ActiveSlot::Main => params.selection.main_driver.as_str(),
        ActiveSlot::Reserve => params.selection.reserve_driver.as_str(),
    };
    let active_points = match slot {
        ActiveSlot::Main => params.base_main_points,
        ActiveSlot::Reserve => params.base_reserve_points,
    };

    let with_active = |new_active: f64, effect: CardEffectOutcome| {
        let (main, reserve) = match slot {
            ActiveSlot::Main => (new_active, params.base_reserve_points),
            ActiveSlot::Reserve => (params.base_main_points, new_active),
        };
        DriverCardApplication { main_driver_points: main, reserve_driver_points: reserve, effect }
    };

    match &card.effect {
        CardEffect::Multiply { factor } => {
            let new_points = active_points * factor;
            with_active(
                new_points,
                CardEffectOutcome::applied(
                    card,
                    format!(
                        "{active_driver}'s points multiplied x{factor}: {active_points} -> {new_points}"
                    ),
                ),
            )
        }

        CardEffect::Mirror => apply_mirror(ctx, params, card),

        CardEffect::Switcheroo => {
            let Some(target) = params.card_selection.target_driver.as_deref() else {
                return unchanged(
                    params,
                    CardEffectOutcome::not_applied(card, "Switcheroo activated without a target driver"),
                );
            };
            match find_driver_result(ctx.normalizer, target, &params.race.driver_results) {
                Some(row) => with_active(
                    row.points,
                    CardEffectOutcome::applied(
                        card,
                        format!(
                            "{active_driver} scores {}'s result instead: {} points",
                            row.driver, row.points
                        ),
                    ),
                ),
                None => unchanged(
                    params,
                    CardEffectOutcome::not_applied(
                        card,
                        format!("Switcheroo target '{target}' has no result this round"),
                    ),
                ),
            }
        }

        CardEffect::TeamworkAdd => match teammate_points(ctx, params, active_driver) {
            Some((teammate, teammate_pts)) => with_active(
                active_points + teammate_pts,
                CardEffectOutcome::applied(
                    card,
                    format!(
                        "{active_driver} gains teammate {teammate}'s {teammate_pts} points: {} total",
                        active_points + teammate_pts
                    ),
                ),
            ),
            None => unchanged(
                params,
                CardEffectOutcome::not_applied(card, format!("{active_driver} has no teammate on the roster")),
            ),
        },

        CardEffect::TeamworkSwap => match teammate_points(ctx, params, active_driver) {
            Some((teammate, teammate_pts)) => with_active(
                teammate_pts,
                CardEffectOutcome::applied(
                    card,
                    format!("{active_driver} scores teammate {teammate}'s {teammate_pts} points instead"),
                ),
            ),
            None => unchanged(
                params,
                CardEffectOutcome::not_applied(card, format!("{active_driver} has no teammate on the roster")),
            ),
        },

        CardEffect::PositionAdjust { places } => {
            let row = find_driver_result(ctx.normalizer, active_driver, &params.race.driver_results);
            match row.and_then(|r| r.position) {
                Some(position) => {
                    let new_position = position.saturating_sub(*places).max(1);
                    let new_points = grand_prix_points(new_position);
                    with_active(
                        new_points,
                        CardEffectOutcome::applied(
                            card,
                            format!(
                                "{active_driver} reclassified P{position} -> P{new_position}: {new_points} points"
                            ),
                        ),
                    )
                }
                None => unchanged(
                    params,
                    CardEffectOutcome::not_applied(
                        card,
                        format!("{active_driver} was not classified, cannot shift position"),
                    ),
                ),
            }
        }

        CardEffect::ConditionalBonus { condition, bonus } => {
            apply_conditional(ctx, params, card, slot, *condition, *bonus)
        }

        CardEffect::FlatBonus { amount } => with_active(
            active_points + amount,
            CardEffectOutcome::applied(
                card,
                format!("{active_driver} gains a flat {amount} bonus points"),
            ),
        ),

        // Substitutes are drawn from a pre-filtered pool, so a nested
        // Mystery/Random can only come from a corrupt stored transform.
        CardEffect::Mystery | CardEffect::Random => unchanged(
            params,
            CardEffectOutcome::not_applied(card, "unresolved substitution card, no effect"),
        ),

        CardEffect::Espionage | CardEffect::Podium { .. } | CardEffect::Undercut => unchanged(
            params,
            CardEffectOutcome::not_applied(
                card,
                format!("'{}' is a team-side effect, not applicable to a driver slot", card.effect.tag()),
            ),
        ),

        CardEffect::Unknown { raw } => unchanged(
            params,
            CardEffectOutcome::not_applied(card, format!("unrecognized effect type '{raw}'")),
        ),
    }
}

fn apply_mirror(
    ctx: &ScoringContext,
    params: &DriverCardParams,
    card: &Card,
) -> DriverCardApplication {
    let target = params.card_selection.target_player.as_deref();
    let league = params.selection.league_id.as_deref();
    let round = params.selection.round.or(Some(params.race.round));

    let (Some(target), Some(league), Some(round)) = (target, league, round) else {
        return unchanged(
            params,
            CardEffectOutcome::not_applied(card, "Mirror activated without a target player or league context"),
        );
    };

    match ctx.player_scores.round_score(target, league, round) {
        Some(score) => DriverCardApplication {
            main_driver_points: score.main_driver_points,
            reserve_driver_points: score.reserve_driver_points,
            effect: CardEffectOutcome::applied(
                card,
                format!(
                    "mirrored {target}'s round: main {} points, reserve {} points",
                    score.main_driver_points, score.reserve_driver_points
                ),
            ),
        },
        None => DriverCardApplication {
            main_driver_points: 0.0,
            reserve_driver_points: 0.0,
            effect: CardEffectOutcome::applied(
                card,
                format!("{target} has no score this round, mirrored 0 points"),
            ),
        },
    }
}

fn apply_conditional(
    ctx: &ScoringContext,
    params: &DriverCardParams,
    card: &Card,
    slot: ActiveSlot,
    condition: BonusCondition,
    bonus: BonusAmount,
) -> DriverCardApplication {
    let active_driver = match slot {
        ActiveSlot::Main => params.selection.main_driver.as_str(),
        ActiveSlot::Reserve => params.selection.reserve_driver.as_str(),
    };
    let active_points = match slot {
        ActiveSlot::Main => params.base_main_points,
        ActiveSlot::Reserve => params.base_reserve_points,
    };

    let BonusAmount::Flat(amount) = bonus else {
        return unchanged(
            params,
            CardEffectOutcome::not_applied(card, "malformed bonus payload for a driver condition"),
        );
    };

    let position =
        find_driver_result(ctx.normalizer, active_driver, &params.race.driver_results)
            .and_then(|r| r.position);

    let met = match condition {
        BonusCondition::Top5 => position.is_some_and(|p| p <= 5),
        BonusCondition::Top10 => position.is_some_and(|p| p <= 10),
        BonusCondition::AheadOfTeammate => {
            let teammate_position = teammate_of(ctx.normalizer, ctx.roster, active_driver)
                .and_then(|teammate| {
                    find_driver_result(ctx.normalizer, &teammate, &params.race.driver_results)
                })
                .and_then(|r| r.position);
            matches!((position, teammate_position), (Some(p), Some(t)) if p < t)
        }
        BonusCondition::Bottom5 => {
            let grid = params.race.grid_size();
            position.is_some_and(|p| grid >= 5 && p > grid - 5)
        }
        // Team-side condition on a driver card: malformed seed data.
        _ => {
            return unchanged(
                params,
                CardEffectOutcome::not_applied(
                    card,
                    format!("condition '{condition:?}' is not valid for a driver card"),
                ),
            );
        }
    };

    if met {
        let with = active_points + amount;
        let (main, reserve) = match slot {
            ActiveSlot::Main => (with, params.base_reserve_points),
            ActiveSlot::Reserve => (params.base_main_points, with),
        };
        DriverCardApplication {
            main_driver_points: main,
            reserve_driver_points: reserve,
            effect: CardEffectOutcome::applied(
                card,
                format!("{active_driver} met the condition, +{amount} bonus points"),
            ),
        }
    } else {
        unchanged(
            params,
            CardEffectOutcome::not_applied(
                card,
                format!("{active_driver} did not meet the condition, no bonus"),
            ),
        )
    }
}
