pub mod json_api;

pub use json_api::{score_race_json, ScoreRequest, ScoreResponse};
