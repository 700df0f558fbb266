//! Scoring orchestrator.
//!
//! One stateless pass per (selection, round): compute base points for the
//! three slots, gate card eligibility, hand each activated card to its
//! resolver, and sum into a [`RaceScore`]. This function never fails —
//! missing race data scores zero and card-level problems surface as
//! descriptions in the breakdown.

use rand::Rng;
use tracing::debug;

use crate::effects::{
    apply_driver_card_effect, apply_team_card_effect, DriverCardParams, TeamCardParams,
};
use crate::lookup::{find_driver_result, team_round_points};
use crate::models::{RaceCardSelection, RaceResult, RaceScore, ScoreBreakdown, Selection};
use crate::ports::ScoringContext;

/// Power cards were introduced with the 2026 season.
pub const CARDS_FIRST_SEASON: u16 = 2026;

/// Season/sprint gate. Sprint weekends run a different points structure
/// and have no card slot.
pub fn cards_eligible(race: &RaceResult) -> bool {
    race.season >= CARDS_FIRST_SEASON && !race.is_sprint_weekend
}

/// Base points for the main driver slot: zero on DNS, race plus sprint
/// points on sprint weekends.
fn base_main_points(ctx: &ScoringContext, selection: &Selection, race: &RaceResult) -> f64 {
    match find_driver_result(ctx.normalizer, &selection.main_driver, &race.driver_results) {
        Some(row) if row.did_not_start => 0.0,
        Some(row) => {
            if race.is_sprint_weekend {
                row.points + row.sprint_points
            } else {
                row.points
            }
        }
        None => 0.0,
    }
}

/// Base points for the reserve slot. On sprint weekends the reserve's
/// sprint points always count; on regular weekends the reserve only
/// scores when the main driver did not start (or is absent from the
/// results entirely).
fn base_reserve_points(ctx: &ScoringContext, selection: &Selection, race: &RaceResult) -> f64 {
    let reserve_row =
        find_driver_result(ctx.normalizer, &selection.reserve_driver, &race.driver_results);

    if race.is_sprint_weekend {
        return reserve_row.map(|r| r.sprint_points).unwrap_or(0.0);
    }

    let main_dns =
        match find_driver_result(ctx.normalizer, &selection.main_driver, &race.driver_results) {
            Some(row) => row.did_not_start,
            None => true,
        };
    if main_dns {
        reserve_row.map(|r| r.points).unwrap_or(0.0)
    } else {
        0.0
    }
}

/// Score one selection for one round.
pub fn calculate_race_points<R: Rng>(
    ctx: &ScoringContext,
    selection: &Selection,
    race: &RaceResult,
    card_selection: Option<&RaceCardSelection>,
    rng: &mut R,
) -> RaceScore {
    let base_main = base_main_points(ctx, selection, race);
    let base_reserve = base_reserve_points(ctx, selection, race);
    let base_team = team_round_points(ctx.normalizer, &selection.team, race);

    let eligible = cards_eligible(race);

    let mut breakdown = ScoreBreakdown {
        base_main_driver_points: base_main,
        base_reserve_driver_points: base_reserve,
        base_team_points: base_team,
        main_driver_points: base_main,
        reserve_driver_points: base_reserve,
        team_points: base_team,
        cards_eligible: eligible,
        driver_card_effect: None,
        team_card_effect: None,
    };

    if let Some(cards) = card_selection.filter(|_| eligible) {
        if let Some(driver_card) = &cards.driver_card {
            let params = DriverCardParams {
                card: driver_card,
                base_main_points: base_main,
                base_reserve_points: base_reserve,
                selection,
                card_selection: cards,
                race,
            };
            let application = apply_driver_card_effect(ctx, &params, rng);
            breakdown.main_driver_points = application.main_driver_points;
            breakdown.reserve_driver_points = application.reserve_driver_points;
            breakdown.driver_card_effect = Some(application.effect);
        }

        if let Some(team_card) = &cards.team_card {
            let params = TeamCardParams {
                card: team_card,
                base_team_points: base_team,
                selection,
                card_selection: cards,
                race,
            };
            let application = apply_team_card_effect(ctx, &params, rng);
            breakdown.team_points = application.team_points;
            breakdown.team_card_effect = Some(application.effect);
        }
    } else if card_selection.is_some() {
        debug!(
            season = race.season,
            sprint = race.is_sprint_weekend,
            "cards activated but not eligible this round"
        );
    }

    let total_points =
        breakdown.main_driver_points + breakdown.reserve_driver_points + breakdown.team_points;

    RaceScore { total_points, breakdown }
}
