pub mod aggregate;
pub mod constants;
pub mod ingredient_cost;
pub mod units;

pub use aggregate::{calculate, estimate, profit_margin, suggest_pricing, CostEstimate};
pub use constants::*;
pub use ingredient_cost::{ingredient_cost, unit_cost};
pub use units::{convert, convert_or_identity, convert_with_density};
