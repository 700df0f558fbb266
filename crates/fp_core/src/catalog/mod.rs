//! Embedded reference data: the season card catalog and roster.

pub mod cards;
pub mod roster;

pub use cards::{card_by_name, driver_cards, team_cards, EmbeddedCardPool};
pub use roster::StaticRoster;
