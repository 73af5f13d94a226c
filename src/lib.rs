pub mod calculator;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use error::{CostError, Result};
pub use models::{CalculationResult, Ingredient, PurchaseEntry, Recipe, Unit};
