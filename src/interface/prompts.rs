use dialoguer::{Confirm, Input, Select};

use crate::error::{CostError, Result};
use crate::models::purchase::parse_number;
use crate::models::{Ingredient, PurchaseEntry, Recipe, Unit};
use crate::state::RecipeLibrary;

/// Let the user pick a recipe from the library.
pub fn prompt_recipe(library: &RecipeLibrary) -> Result<Recipe> {
    if library.is_empty() {
        return Err(CostError::RecipeNotFound("library is empty".to_string()));
    }

    let options: Vec<String> = library
        .all()
        .iter()
        .map(|r| format!("{} (serves {})", r.name, r.effective_serves()))
        .collect();

    let selection = Select::new()
        .with_prompt("Which recipe do you want to price?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(library.all()[selection].clone())
}

fn prompt_text(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input: Input<String> = Input::new().with_prompt(prompt).allow_empty(true);
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    Ok(input.interact_text()?)
}

fn parse_unit_or_warn(text: &str) -> Option<Unit> {
    if text.trim().is_empty() {
        return None;
    }
    match text.parse() {
        Ok(unit) => Some(unit),
        Err(e) => {
            println!("  {e} (leaving this ingredient unpriced)");
            None
        }
    }
}

/// Ask what was paid for one ingredient. Blank answers leave fields unset.
pub fn prompt_purchase(ingredient: &Ingredient) -> Result<PurchaseEntry> {
    let needs = match ingredient.required() {
        Some((q, unit)) => format!("{q} {unit}"),
        None => ingredient.quantity.to_string(),
    };
    println!();
    println!("{} - recipe needs {}", ingredient.item, needs);

    let default_unit = ingredient.unit.map(Unit::symbol);

    let quantity = prompt_text("  Quantity bought (blank to skip)", None)?;
    if quantity.trim().is_empty() {
        return Ok(PurchaseEntry::default());
    }
    let unit = prompt_text("  Unit bought", default_unit)?;
    let price = prompt_text("  Price paid", None)?;

    let mut entry = PurchaseEntry {
        purchase_quantity: parse_number(&quantity),
        purchase_unit: parse_unit_or_warn(&unit),
        purchase_price: parse_number(&price),
        actual_quantity: None,
        actual_unit: None,
    };

    if ingredient.is_to_taste() {
        let actual = prompt_text("  How much will you actually use?", None)?;
        let actual_unit = prompt_text("  In which unit?", Some(unit.trim()))?;
        entry.actual_quantity = parse_number(&actual);
        entry.actual_unit = parse_unit_or_warn(&actual_unit);
    }

    Ok(entry)
}

/// Ask for the profit margin in percent. Blank or invalid input means "use the default".
pub fn prompt_margin() -> Result<Option<f64>> {
    let input = prompt_text("Profit margin in % (blank for default)", None)?;
    Ok(parse_number(input.trim_end_matches('%')))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
