//! Card effect resolvers, one per card side.

pub mod driver;
pub mod team;

pub use driver::{apply_driver_card_effect, DriverCardApplication, DriverCardParams};
pub use team::{apply_team_card_effect, TeamCardApplication, TeamCardParams};
