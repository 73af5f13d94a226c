pub mod calculation;
pub mod purchase;
pub mod recipe;
pub mod unit;

pub use calculation::{
    CalculationHistoryEntry, CalculationResult, CostBasis, IngredientCost, PricingSuggestion,
};
pub use purchase::{CompletePurchase, PurchaseEntry};
pub use recipe::{Ingredient, Quantity, Recipe};
pub use unit::{Unit, UnitFamily};
