use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Unit;

/// How a unit cost was derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum CostBasis {
    /// Recipe and purchase units share a family.
    Exact,
    /// Weight and volume bridged through the ingredient's density.
    DensityBridged { grams_per_cup: f64 },
    /// Units could not be reconciled; cost is the naive price per purchased quantity.
    Approximate,
}

impl CostBasis {
    pub fn is_approximate(&self) -> bool {
        matches!(self, CostBasis::Approximate)
    }
}

/// Cost figures for one priced ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientCost {
    /// Price of one recipe unit (or one "actual" unit for "to taste" items).
    pub unit_cost: f64,
    /// `unit_cost` times the quantity the recipe uses.
    pub recipe_cost: f64,
    /// The unit `unit_cost` is expressed in.
    pub cost_unit: Unit,
    pub basis: CostBasis,
}

/// Suggested sale pricing derived from cost per portion and a profit margin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSuggestion {
    pub margin_percent: f64,
    pub suggested_price_per_portion: f64,
    pub total_sale_price: f64,
    pub expected_profit: f64,
}

/// Outcome of pressing "Calculate" for a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub recipe_id: String,
    pub recipe_name: String,
    pub total_cost: f64,
    pub cost_per_portion: f64,
    pub serves: u32,
    pub included_ingredients: usize,
    pub total_ingredients: usize,
    /// Keyed by the ingredient's index in the recipe.
    pub ingredient_costs: BTreeMap<usize, IngredientCost>,
    pub pricing: PricingSuggestion,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl CalculationResult {
    /// True if every cost and price figure is a finite number.
    pub fn is_finite(&self) -> bool {
        let pricing = &self.pricing;
        [
            self.total_cost,
            self.cost_per_portion,
            pricing.margin_percent,
            pricing.suggested_price_per_portion,
            pricing.total_sale_price,
            pricing.expected_profit,
        ]
        .iter()
        .chain(
            self.ingredient_costs
                .values()
                .flat_map(|c| [&c.unit_cost, &c.recipe_cost]),
        )
        .all(|v| v.is_finite())
    }

    /// True if any ingredient fell back to a naive, unit-mismatched cost.
    pub fn has_approximations(&self) -> bool {
        self.ingredient_costs
            .values()
            .any(|c| c.basis.is_approximate())
    }
}

/// A saved calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationHistoryEntry {
    pub id: u64,
    /// Milliseconds since the Unix epoch.
    pub saved_at: u64,
    pub calculation: CalculationResult,
}
