//! Fantasy Paddock CLI
//!
//! Scores a selection against a race result from JSON files and prints
//! the breakdown. Useful for replaying rounds and checking card effects
//! without the service layer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fp_cli")]
#[command(about = "Score fantasy F1 selections against race results", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one selection for one round
    Score {
        /// Selection JSON file (main/reserve driver, team)
        #[arg(long)]
        selection: PathBuf,

        /// Race result JSON file
        #[arg(long)]
        result: PathBuf,

        /// Optional card activation JSON file
        #[arg(long)]
        cards: Option<PathBuf>,

        /// Seed for Mystery/Random resolution
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Pretty-print the breakdown
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// List the season card catalog
    Catalog,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score { selection, result, cards, seed, pretty } => {
            let selection: serde_json::Value = read_json(&selection)?;
            let race_result: serde_json::Value = read_json(&result)?;
            let card_selection = cards.map(|path| read_json(&path)).transpose()?;

            let mut request = serde_json::json!({
                "schema_version": 1,
                "seed": seed,
                "selection": selection,
                "race_result": race_result,
            });
            if let Some(card_selection) = card_selection {
                request["card_selection"] = card_selection;
            }

            let response = fp_core::score_race_json(&request.to_string())
                .map_err(|e| anyhow::anyhow!("scoring failed: {e}"))?;

            if pretty {
                let value: serde_json::Value = serde_json::from_str(&response)?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{response}");
            }
        }

        Commands::Catalog => {
            println!("Driver cards:");
            for card in fp_core::driver_cards() {
                println!("  {:<20} {:?} (slots: {})", card.name, card.tier, card.slot_cost);
            }
            println!("Team cards:");
            for card in fp_core::team_cards() {
                println!("  {:<20} {:?} (slots: {})", card.name, card.tier, card.slot_cost);
            }
        }
    }

    Ok(())
}

fn read_json(path: &PathBuf) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
