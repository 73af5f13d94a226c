use thiserror::Error;

use crate::models::Unit;

#[derive(Debug, Error)]
pub enum CostError {
    #[error("Cannot convert {from} to {to}: incompatible unit families")]
    IncompatibleUnits { from: Unit, to: Unit },

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("No ingredients have been priced yet")]
    NothingPriced,

    #[error("History entry not found: {0}")]
    HistoryEntryNotFound(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CostError>;
