//! JSON facade for the scoring engine.
//!
//! Everything the surrounding service layer needs goes through one
//! request/response pair, keeping the boundary a plain string contract.

use serde::{Deserialize, Serialize};

use crate::catalog::{card_by_name, EmbeddedCardPool, StaticRoster};
use crate::error::ScoringError;
use crate::lookup::RaceResultTeamScores;
use crate::models::{Card, CardKind, RaceCardSelection, RaceResult, RaceScore, Selection, TargetKind};
use crate::ports::{NoPlayerScores, ScoringContext};
use crate::scoring::calculate_race_points;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub schema_version: u8,
    /// Drives Mystery/Random pool draws. Persist alongside the activation
    /// so recomputation stays deterministic even before the transformation
    /// is stored.
    #[serde(default)]
    pub seed: u64,
    pub selection: Selection,
    pub race_result: RaceResult,
    #[serde(default)]
    pub card_selection: Option<RaceCardSelection>,
    /// Catalog shorthand: activate cards by name instead of embedding the
    /// full card documents in `card_selection`.
    #[serde(default)]
    pub driver_card_name: Option<String>,
    #[serde(default)]
    pub team_card_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub schema_version: u8,
    #[serde(flatten)]
    pub score: RaceScore,
}

/// Score one selection for one round from a JSON request.
///
/// Scoring itself cannot fail; `Err` only reports a malformed request or
/// an unknown catalog card name.
pub fn score_race_json(request_json: &str) -> Result<String, String> {
    score_race(request_json).map_err(|e| e.to_string())
}

fn score_race(request_json: &str) -> Result<String, ScoringError> {
    // Parse request
    let request: ScoreRequest = serde_json::from_str(request_json)
        .map_err(|e| ScoringError::InvalidRequest(format!("invalid JSON request: {e}")))?;

    // Validate schema version
    if request.schema_version != 1 {
        return Err(ScoringError::UnsupportedSchemaVersion(request.schema_version));
    }

    let mut card_selection = request.card_selection;

    // Resolve by-name activations through the embedded catalog. A by-name
    // activation of a targeted card must ship its target up front; a card
    // stored in card_selection with a missing target stays a scoring no-op.
    if let Some(name) = &request.driver_card_name {
        let card = card_by_name(CardKind::Driver, name).ok_or_else(|| {
            ScoringError::UnknownCard { kind: CardKind::Driver, name: name.clone() }
        })?;
        let cards = card_selection.get_or_insert_with(Default::default);
        ensure_target_supplied(card, cards)?;
        cards.driver_card = Some(card.clone());
    }
    if let Some(name) = &request.team_card_name {
        let card = card_by_name(CardKind::Team, name).ok_or_else(|| {
            ScoringError::UnknownCard { kind: CardKind::Team, name: name.clone() }
        })?;
        let cards = card_selection.get_or_insert_with(Default::default);
        ensure_target_supplied(card, cards)?;
        cards.team_card = Some(card.clone());
    }

    let team_scores = RaceResultTeamScores::new(&request.race_result, &StaticRoster);
    let ctx = ScoringContext {
        normalizer: &StaticRoster,
        roster: &StaticRoster,
        player_scores: &NoPlayerScores,
        team_scores: &team_scores,
        card_pool: &EmbeddedCardPool,
    };

    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let score = calculate_race_points(
        &ctx,
        &request.selection,
        &request.race_result,
        card_selection.as_ref(),
        &mut rng,
    );

    let response = ScoreResponse { schema_version: 1, score };
    Ok(serde_json::to_string(&response)?)
}

fn ensure_target_supplied(card: &Card, cards: &RaceCardSelection) -> Result<(), ScoringError> {
    let Some(target) = card.required_target() else {
        return Ok(());
    };
    let supplied = match target {
        TargetKind::Player => cards.target_player.is_some(),
        TargetKind::Driver => cards.target_driver.is_some(),
        TargetKind::Team => cards.target_team.is_some(),
    };
    if supplied {
        Ok(())
    } else {
        Err(ScoringError::InvalidRequest(format!(
            "card '{}' requires {target} in card_selection",
            card.name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_json(season: u16, card_block: &str) -> String {
        format!(
            r#"{{
                "schema_version": 1,
                "seed": 42,
                "selection": {{
                    "main_driver": "Max Verstappen",
                    "reserve_driver": "Checo",
                    "team": "Scuderia Ferrari",
                    "round": 5,
                    "league_id": "league-1",
                    "user_id": "user-1"
                }},
                "race_result": {{
                    "season": {season},
                    "round": 5,
                    "is_sprint_weekend": false,
                    "driver_results": [
                        {{"driver": "M. Verstappen", "position": 2, "points": 18.0}},
                        {{"driver": "S. Perez", "position": 9, "points": 2.0}}
                    ],
                    "team_results": [
                        {{"team": "Ferrari", "race_points": 27.0, "sprint_points": 0.0, "total_points": 27.0}}
                    ]
                }}{card_block}
            }}"#
        )
    }

    #[test]
    fn test_score_round_trip() {
        let response = score_race_json(&request_json(2026, "")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["total_points"], 45.0);
        assert_eq!(value["breakdown"]["main_driver_points"], 18.0);
        assert_eq!(value["breakdown"]["team_points"], 27.0);
        assert_eq!(value["breakdown"]["cards_eligible"], true);
    }

    #[test]
    fn test_card_selection_with_embedded_card() {
        let card_block = r#",
            "card_selection": {
                "driver_card": {
                    "name": "Double Down",
                    "kind": "driver",
                    "tier": "gold",
                    "slot_cost": 3,
                    "effect": {"type": "multiply", "factor": 2.0}
                }
            }"#;
        let response = score_race_json(&request_json(2026, card_block)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["breakdown"]["main_driver_points"], 36.0);
        assert_eq!(value["breakdown"]["driver_card_effect"]["effect_applied"], true);
    }

    #[test]
    fn test_card_activation_by_catalog_name() {
        let card_block = r#",
            "driver_card_name": "Double Down""#;
        let response = score_race_json(&request_json(2026, card_block)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["breakdown"]["main_driver_points"], 36.0);
        assert_eq!(value["breakdown"]["driver_card_effect"]["card_name"], "Double Down");
    }

    #[test]
    fn test_by_name_targeted_card_needs_its_target() {
        let card_block = r#",
            "driver_card_name": "Switcheroo""#;
        let err = score_race_json(&request_json(2026, card_block)).unwrap_err();
        assert!(err.contains("target_driver"));
    }

    #[test]
    fn test_by_name_targeted_card_with_target_scores() {
        let card_block = r#",
            "driver_card_name": "Switcheroo",
            "card_selection": {"target_driver": "S. Perez"}"#;
        let response = score_race_json(&request_json(2026, card_block)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["breakdown"]["main_driver_points"], 2.0);
        assert_eq!(value["breakdown"]["driver_card_effect"]["effect_applied"], true);
    }

    #[test]
    fn test_unknown_catalog_name_is_an_error() {
        let card_block = r#",
            "driver_card_name": "No Such Card""#;
        let err = score_race_json(&request_json(2026, card_block)).unwrap_err();
        assert!(err.contains("Unknown card"));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = score_race_json("not json").unwrap_err();
        assert!(err.contains("invalid JSON request"));
    }

    #[test]
    fn test_unsupported_schema_version() {
        let bad = request_json(2026, "").replace("\"schema_version\": 1", "\"schema_version\": 3");
        let err = score_race_json(&bad).unwrap_err();
        assert!(err.contains("Unsupported schema version"));
    }
}
