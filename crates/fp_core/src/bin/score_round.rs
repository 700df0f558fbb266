// Manual scoring harness
// Run with: cargo run --bin score_round
//
// Builds one round of requests (no card, driver card, team card) against
// a fixed result sheet and prints each breakdown.

use fp_core::api::score_race_json;
use serde_json::Value;

fn create_request(seed: u64, card_block: &str) -> String {
    format!(
        r#"{{
        "schema_version": 1,
        "seed": {seed},
        "selection": {{
            "main_driver": "Max Verstappen",
            "reserve_driver": "Liam Lawson",
            "team": "Ferrari",
            "round": 7,
            "league_id": "demo-league",
            "user_id": "demo-user"
        }},
        "race_result": {{
            "season": 2026,
            "round": 7,
            "is_sprint_weekend": false,
            "driver_results": [
                {{"driver": "L. Norris", "position": 1, "points": 25.0}},
                {{"driver": "M. Verstappen", "position": 2, "points": 18.0}},
                {{"driver": "C. Leclerc", "position": 3, "points": 15.0}},
                {{"driver": "L. Hamilton", "position": 4, "points": 12.0}},
                {{"driver": "G. Russell", "position": 5, "points": 10.0}},
                {{"driver": "O. Piastri", "position": 6, "points": 8.0}},
                {{"driver": "L. Lawson", "position": 7, "points": 6.0}}
            ],
            "team_results": [
                {{"team": "McLaren", "race_points": 33.0, "sprint_points": 0.0, "total_points": 33.0}},
                {{"team": "Ferrari", "race_points": 27.0, "sprint_points": 0.0, "total_points": 27.0}},
                {{"team": "Red Bull", "race_points": 18.0, "sprint_points": 0.0, "total_points": 18.0}}
            ]
        }}{card_block}
    }}"#
    )
}

fn print_score(label: &str, response_json: &str) {
    let value: Value = serde_json::from_str(response_json).expect("valid response JSON");
    println!("=== {label} ===");
    println!("  total: {}", value["total_points"]);
    println!(
        "  main {} | reserve {} | team {}",
        value["breakdown"]["main_driver_points"],
        value["breakdown"]["reserve_driver_points"],
        value["breakdown"]["team_points"]
    );
    if let Some(effect) = value["breakdown"].get("driver_card_effect") {
        println!("  driver card: {}", effect["description"]);
    }
    if let Some(effect) = value["breakdown"].get("team_card_effect") {
        println!("  team card: {}", effect["description"]);
    }
    println!();
}

fn main() {
    let no_cards = score_race_json(&create_request(1, "")).expect("scoring failed");
    print_score("no cards", &no_cards);

    let double_down = r#",
        "card_selection": {
            "driver_card": {
                "name": "Double Down",
                "kind": "driver",
                "tier": "gold",
                "slot_cost": 3,
                "effect": {"type": "multiply", "factor": 2.0}
            }
        }"#;
    let doubled = score_race_json(&create_request(1, double_down)).expect("scoring failed");
    print_score("Double Down on the main driver", &doubled);

    let podium_party = r#",
        "card_selection": {
            "team_card": {
                "name": "Podium Party",
                "kind": "team",
                "tier": "gold",
                "slot_cost": 3,
                "effect": {"type": "podium", "points_per_podium": 8.0, "max_points": 16.0}
            }
        }"#;
    let podiums = score_race_json(&create_request(1, podium_party)).expect("scoring failed");
    print_score("Podium Party on Ferrari", &podiums);

    let mystery = r#",
        "card_selection": {
            "driver_card": {
                "name": "Mystery Box",
                "kind": "driver",
                "tier": "gold",
                "slot_cost": 3,
                "effect": {"type": "mystery"}
            }
        }"#;
    for seed in [1u64, 2, 3] {
        let resolved = score_race_json(&create_request(seed, mystery)).expect("scoring failed");
        print_score(&format!("Mystery Box, seed {seed}"), &resolved);
    }
}
