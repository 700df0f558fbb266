use thiserror::Error;

use crate::models::CardKind;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(u8),

    #[error("Unknown card: {name} ({kind})")]
    UnknownCard { kind: CardKind, name: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoringError>;
