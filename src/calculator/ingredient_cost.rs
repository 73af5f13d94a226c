use tracing::debug;

use crate::calculator::constants::density_for;
use crate::calculator::units::{convert, convert_with_density};
use crate::models::{
    CompletePurchase, CostBasis, Ingredient, IngredientCost, PurchaseEntry, Quantity, Unit,
};

/// Price of one `cost_unit` of an ingredient bought as `purchase`.
///
/// One `cost_unit` is expressed in purchase units and multiplied by the price
/// per purchase unit. Weight and volume bridge through the ingredient's
/// density when one is known; any other mismatch falls back to the plain
/// `price / quantity` and is tagged [`CostBasis::Approximate`].
pub fn unit_cost(item: &str, cost_unit: Unit, purchase: &CompletePurchase) -> (f64, CostBasis) {
    let price_per_purchase_unit = purchase.price / purchase.quantity;

    if let Ok(amount) = convert(1.0, cost_unit, purchase.unit) {
        return (amount * price_per_purchase_unit, CostBasis::Exact);
    }

    let bridged = density_for(item).and_then(|grams_per_cup| {
        convert_with_density(1.0, cost_unit, purchase.unit, grams_per_cup)
            .ok()
            .map(|amount| (amount, grams_per_cup))
    });

    match bridged {
        Some((amount, grams_per_cup)) => (
            amount * price_per_purchase_unit,
            CostBasis::DensityBridged { grams_per_cup },
        ),
        None => {
            debug!(
                "'{}': recipe unit {} does not convert to purchase unit {}, using price per {}",
                item, cost_unit, purchase.unit, purchase.unit
            );
            (price_per_purchase_unit, CostBasis::Approximate)
        }
    }
}

/// Cost of one ingredient given what was paid for it.
///
/// Returns `None` while the entry is incomplete, for "to taste"
/// ingredients whose planned amount has not been entered, and when the
/// figures overflow to non-finite values.
pub fn ingredient_cost(ingredient: &Ingredient, entry: &PurchaseEntry) -> Option<IngredientCost> {
    let purchase = entry.complete()?;

    let (quantity, cost_unit) = match (ingredient.quantity, ingredient.unit) {
        (Quantity::Amount(q), Some(unit)) => (q, unit),
        // Unitless amounts ("3 eggs") are read in whatever unit they were bought in.
        (Quantity::Amount(q), None) => (q, purchase.unit),
        (Quantity::ToTaste, _) => entry.actual()?,
    };

    if !(quantity.is_finite() && quantity > 0.0) {
        return None;
    }

    let (unit_cost, basis) = unit_cost(&ingredient.item, cost_unit, &purchase);
    let recipe_cost = quantity * unit_cost;
    if !(unit_cost.is_finite() && recipe_cost.is_finite()) {
        debug!("'{}': cost overflowed, leaving it unpriced", ingredient.item);
        return None;
    }

    Some(IngredientCost {
        unit_cost,
        recipe_cost,
        cost_unit,
        basis,
    })
}
