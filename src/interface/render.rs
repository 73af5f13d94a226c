use crate::calculator::CostEstimate;
use crate::models::{
    CalculationHistoryEntry, CalculationResult, CostBasis, IngredientCost, Recipe, Unit,
};

fn basis_tag(basis: &CostBasis) -> String {
    match basis {
        CostBasis::Exact => String::new(),
        CostBasis::DensityBridged { grams_per_cup } => {
            format!("  [via density {grams_per_cup:.0} g/cup]")
        }
        CostBasis::Approximate => "  [approximate: units don't match]".to_string(),
    }
}

/// Column width of a label; `format!` pads by chars, not bytes.
fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Display the recipes in the library.
pub fn display_recipes(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No recipes found.");
        return;
    }

    println!();
    println!("=== Recipes ({} items) ===", recipes.len());
    println!();

    let max_id_len = recipes.iter().map(|r| text_width(&r.id)).max().unwrap_or(2);
    for recipe in recipes {
        println!(
            "  {:>width$}  {} - serves {}, {} ingredients",
            recipe.id,
            recipe.name,
            recipe.effective_serves(),
            recipe.ingredients.len(),
            width = max_id_len
        );
    }
    println!();
}

/// One-line running total shown while purchase data is entered.
pub fn display_running_total(estimate: &CostEstimate) {
    println!(
        "  Running total: ${:.2} ({} of {} ingredients priced)",
        estimate.total_cost, estimate.included_ingredients, estimate.total_ingredients
    );
}

fn display_ingredient_line(label: &str, width: usize, cost: Option<&IngredientCost>) {
    match cost {
        Some(c) => println!(
            "  {:<width$}  ${:>8.4}/{:<6} ${:>8.2}{}",
            label,
            c.unit_cost,
            c.cost_unit.symbol(),
            c.recipe_cost,
            basis_tag(&c.basis),
            width = width
        ),
        None => println!("  {:<width$}  (not priced)", label, width = width),
    }
}

/// Display a calculation. With the recipe at hand, ingredient names are shown.
pub fn display_calculation(result: &CalculationResult, recipe: Option<&Recipe>) {
    println!();
    println!("=== Cost of {} ===", result.recipe_name);
    println!();

    let labels: Vec<String> = (0..result.total_ingredients)
        .map(|i| {
            recipe
                .and_then(|r| r.ingredients.get(i))
                .map(|ing| ing.item.clone())
                .unwrap_or_else(|| format!("Ingredient #{}", i + 1))
        })
        .collect();
    let width = labels.iter().map(|l| text_width(l)).max().unwrap_or(10);

    for (i, label) in labels.iter().enumerate() {
        display_ingredient_line(label, width, result.ingredient_costs.get(&i));
    }

    let pricing = &result.pricing;
    println!();
    println!("--- Summary ---");
    println!(
        "Ingredients priced: {} of {}",
        result.included_ingredients, result.total_ingredients
    );
    println!("Total cost: ${:.2}", result.total_cost);
    println!(
        "Cost per portion: ${:.2} (serves {})",
        result.cost_per_portion, result.serves
    );
    println!();
    println!("--- Suggested pricing ({:.1}% margin) ---", pricing.margin_percent);
    println!("Price per portion: ${:.2}", pricing.suggested_price_per_portion);
    println!("Total sale price: ${:.2}", pricing.total_sale_price);
    println!("Expected profit: ${:.2}", pricing.expected_profit);

    if result.has_approximations() {
        println!();
        println!("Some costs are approximate because purchase and recipe units don't convert.");
    }
    println!();
}

/// Display saved calculations, oldest first.
pub fn display_history(entries: &[CalculationHistoryEntry]) {
    if entries.is_empty() {
        println!("No saved calculations.");
        return;
    }

    println!();
    println!("=== Saved calculations ({} items) ===", entries.len());
    println!();

    let max_name_len = entries
        .iter()
        .map(|e| text_width(&e.calculation.recipe_name))
        .max()
        .unwrap_or(10);

    for entry in entries {
        let calc = &entry.calculation;
        println!(
            "  {:>13}  {:<width$}  total ${:>8.2} | ${:.2}/portion | {}/{} priced",
            entry.id,
            calc.recipe_name,
            calc.total_cost,
            calc.cost_per_portion,
            calc.included_ingredients,
            calc.total_ingredients,
            width = max_name_len
        );
    }
    println!();
}

/// Display the outcome of a unit conversion.
pub fn display_conversion(
    quantity: f64,
    from: Unit,
    converted: f64,
    to: Unit,
    via_density: Option<f64>,
) {
    match via_density {
        Some(density) => println!(
            "{quantity} {from} = {converted:.4} {to} (density {density:.0} g/cup)"
        ),
        None => println!("{quantity} {from} = {converted:.4} {to}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_counts_chars() {
        assert_eq!(text_width("Crème brûlée"), 12);
        assert_eq!(text_width("Bread"), 5);

        let width = text_width("Crème brûlée");
        let padded = format!("{:<width$}|", "Bread", width = width);
        assert_eq!(padded.chars().count(), width + 1);
    }
}
