use std::collections::BTreeMap;

use crate::calculator::constants::DEFAULT_PROFIT_MARGIN_PERCENT;
use crate::calculator::ingredient_cost::ingredient_cost;
use crate::error::{CostError, Result};
use crate::models::{CalculationResult, IngredientCost, PricingSuggestion, PurchaseEntry, Recipe};

/// Running cost figures for a recipe, recomputed on every input change.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    pub recipe_id: String,
    pub recipe_name: String,
    pub total_cost: f64,
    pub cost_per_portion: f64,
    pub serves: u32,
    pub included_ingredients: usize,
    pub total_ingredients: usize,
    pub ingredient_costs: BTreeMap<usize, IngredientCost>,
    pub pricing: PricingSuggestion,
}

impl CostEstimate {
    pub fn has_priced_ingredients(&self) -> bool {
        self.included_ingredients > 0
    }

    /// Freeze the estimate into a result stamped with `timestamp`.
    ///
    /// Fails with [`CostError::NothingPriced`] when no ingredient has a complete entry,
    /// and with [`CostError::InvalidInput`] when the figures overflow to non-finite values.
    pub fn into_result(self, timestamp: u64) -> Result<CalculationResult> {
        if !self.has_priced_ingredients() {
            return Err(CostError::NothingPriced);
        }
        let result = CalculationResult {
            recipe_id: self.recipe_id,
            recipe_name: self.recipe_name,
            total_cost: self.total_cost,
            cost_per_portion: self.cost_per_portion,
            serves: self.serves,
            included_ingredients: self.included_ingredients,
            total_ingredients: self.total_ingredients,
            ingredient_costs: self.ingredient_costs,
            pricing: self.pricing,
            timestamp,
        };
        if !result.is_finite() {
            return Err(CostError::InvalidInput(format!(
                "Costs for '{}' are too large to represent",
                result.recipe_name
            )));
        }
        Ok(result)
    }
}

/// Effective profit margin in percent. Absent, non-finite or negative input uses the default.
pub fn profit_margin(input: Option<f64>) -> f64 {
    input
        .filter(|m| m.is_finite() && *m >= 0.0)
        .unwrap_or(DEFAULT_PROFIT_MARGIN_PERCENT)
}

/// Sale pricing for a given cost per portion.
///
/// price_per_portion = cost_per_portion * (1 + margin / 100);
/// total = price_per_portion * serves; profit = total - cost_per_portion * serves.
pub fn suggest_pricing(
    cost_per_portion: f64,
    serves: u32,
    margin_percent: f64,
) -> PricingSuggestion {
    let suggested_price_per_portion = cost_per_portion * (1.0 + margin_percent / 100.0);
    let total_sale_price = suggested_price_per_portion * serves as f64;
    let total_cost = cost_per_portion * serves as f64;
    PricingSuggestion {
        margin_percent,
        suggested_price_per_portion,
        total_sale_price,
        expected_profit: total_sale_price - total_cost,
    }
}

/// Combine every priced ingredient of `recipe` into one estimate.
///
/// `entries[i]` is the purchase entry for `recipe.ingredients[i]`; missing or
/// incomplete entries are skipped. Pure: the same inputs always give the same
/// estimate.
pub fn estimate(recipe: &Recipe, entries: &[PurchaseEntry], margin: Option<f64>) -> CostEstimate {
    let ingredient_costs: BTreeMap<usize, IngredientCost> = recipe
        .ingredients
        .iter()
        .zip(entries)
        .enumerate()
        .filter_map(|(i, (ingredient, entry))| ingredient_cost(ingredient, entry).map(|c| (i, c)))
        .collect();

    let total_cost: f64 = ingredient_costs.values().map(|c| c.recipe_cost).sum();
    let serves = recipe.effective_serves();
    let cost_per_portion = total_cost / serves as f64;

    CostEstimate {
        recipe_id: recipe.id.clone(),
        recipe_name: recipe.name.clone(),
        total_cost,
        cost_per_portion,
        serves,
        included_ingredients: ingredient_costs.len(),
        total_ingredients: recipe.ingredients.len(),
        ingredient_costs,
        pricing: suggest_pricing(cost_per_portion, serves, profit_margin(margin)),
    }
}

/// Estimate and freeze in one step. See [`CostEstimate::into_result`].
pub fn calculate(
    recipe: &Recipe,
    entries: &[PurchaseEntry],
    margin: Option<f64>,
    timestamp: u64,
) -> Result<CalculationResult> {
    estimate(recipe, entries, margin).into_result(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, Unit};
    use assert_float_eq::assert_float_absolute_eq;

    fn sample_recipe(serves: Option<i64>) -> Recipe {
        Recipe {
            id: "1".to_string(),
            name: "Bread".to_string(),
            serves,
            ingredients: vec![
                Ingredient::new("flour", 500.0, Unit::Gram),
                Ingredient::new("water", 300.0, Unit::Milliliter),
                Ingredient::to_taste("salt"),
            ],
        }
    }

    #[test]
    fn test_profit_margin_defaults() {
        assert_eq!(profit_margin(None), 20.0);
        assert_eq!(profit_margin(Some(f64::NAN)), 20.0);
        assert_eq!(profit_margin(Some(-5.0)), 20.0);
        assert_eq!(profit_margin(Some(0.0)), 0.0);
        assert_eq!(profit_margin(Some(35.0)), 35.0);
    }

    #[test]
    fn test_suggest_pricing() {
        // 4 portions at $3.00 with 25% -> $3.75 each, $15 total, $3 profit
        let pricing = suggest_pricing(3.0, 4, 25.0);
        assert_float_absolute_eq!(pricing.suggested_price_per_portion, 3.75, 1e-9);
        assert_float_absolute_eq!(pricing.total_sale_price, 15.0, 1e-9);
        assert_float_absolute_eq!(pricing.expected_profit, 3.0, 1e-9);
    }

    #[test]
    fn test_estimate_partial_entries() {
        let recipe = sample_recipe(Some(2));
        let entries = vec![
            PurchaseEntry::new(1000.0, Unit::Gram, 2.0),
            PurchaseEntry::default(),
        ];
        let est = estimate(&recipe, &entries, None);
        assert_eq!(est.included_ingredients, 1);
        assert_eq!(est.total_ingredients, 3);
        assert_float_absolute_eq!(est.total_cost, 1.0, 1e-9);
        assert_float_absolute_eq!(est.cost_per_portion, 0.5, 1e-9);
        assert_eq!(est.pricing.margin_percent, 20.0);
    }

    #[test]
    fn test_zero_serves_floors_to_one() {
        let recipe = sample_recipe(Some(0));
        let entries = vec![PurchaseEntry::new(1000.0, Unit::Gram, 2.0)];
        let est = estimate(&recipe, &entries, None);
        assert_eq!(est.serves, 1);
        assert_eq!(est.cost_per_portion, est.total_cost);
    }

    #[test]
    fn test_calculate_rejects_nothing_priced() {
        let recipe = sample_recipe(Some(2));
        let entries = vec![PurchaseEntry::from_text("1", "kg", ""); 3];
        let err = calculate(&recipe, &entries, None, 0).unwrap_err();
        assert!(matches!(err, CostError::NothingPriced));
    }

    #[test]
    fn test_overflowing_totals_are_rejected() {
        let recipe = Recipe {
            id: "2".to_string(),
            name: "Gold Leaf".to_string(),
            serves: Some(1),
            ingredients: vec![
                Ingredient::new("gold", 1.0, Unit::Gram),
                Ingredient::new("platinum", 1.0, Unit::Gram),
            ],
        };
        let entries = vec![
            PurchaseEntry::new(1.0, Unit::Gram, 1e308),
            PurchaseEntry::new(1.0, Unit::Gram, 1e308),
        ];
        let err = calculate(&recipe, &entries, None, 0).unwrap_err();
        assert!(matches!(err, CostError::InvalidInput(_)));

        let huge_margin = calculate(&recipe, &entries[..1], Some(1e308), 0).unwrap_err();
        assert!(matches!(huge_margin, CostError::InvalidInput(_)));
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let recipe = sample_recipe(Some(3));
        let entries = vec![
            PurchaseEntry::new(1.0, Unit::Kilogram, 2.5),
            PurchaseEntry::new(1.0, Unit::Liter, 0.8),
            PurchaseEntry::new(500.0, Unit::Gram, 1.0).with_actual(5.0, Unit::Gram),
        ];
        let first = estimate(&recipe, &entries, Some(30.0));
        let second = estimate(&recipe, &entries, Some(30.0));
        assert_eq!(first, second);
        assert_eq!(first.included_ingredients, 3);
    }
}
