use std::fs;
use std::path::Path;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use flavorfy_cost::calculator::{convert, convert_with_density, density_for};
use flavorfy_cost::cli::{Cli, Command, HistoryAction};
use flavorfy_cost::config::{Config, DEFAULT_LOG_FILTER};
use flavorfy_cost::error::{CostError, Result};
use flavorfy_cost::interface::{
    display_calculation, display_conversion, display_history, display_recipes,
    display_running_total, prompt_margin, prompt_purchase, prompt_recipe, prompt_yes_no,
};
use flavorfy_cost::models::{PurchaseEntry, Recipe, Unit};
use flavorfy_cost::state::{
    now_millis, require_recipe, CalculatorSession, HistoryStore, RecipeLibrary,
};

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Recipes => cmd_recipes(&config),
        Command::Calculate {
            recipe,
            purchases,
            margin,
            save,
        } => cmd_calculate(&config, recipe.as_deref(), purchases.as_deref(), margin, save),
        Command::History { action } => cmd_history(&config, action.unwrap_or_default()),
        Command::Convert {
            quantity,
            from,
            to,
            ingredient,
        } => cmd_convert(quantity, from, to, ingredient.as_deref()),
        Command::AddRecipe { file } => cmd_add_recipe(&config, &file),
    }
}

/// List the recipe library.
fn cmd_recipes(config: &Config) -> Result<()> {
    let store = config.store();
    let library = RecipeLibrary::load(&config.library_path, &store);
    display_recipes(library.all());
    Ok(())
}

/// Price a recipe, either from a purchases file or interactively.
fn cmd_calculate(
    config: &Config,
    recipe_query: Option<&str>,
    purchases: Option<&Path>,
    margin: Option<f64>,
    save: bool,
) -> Result<()> {
    let store = config.store();
    let library = RecipeLibrary::load(&config.library_path, &store);

    if library.is_empty() {
        println!("No recipes available. Check --library or add one with 'add-recipe'.");
        return Ok(());
    }

    let recipe: Recipe = match recipe_query {
        Some(query) => require_recipe(&library, query)?.clone(),
        None => prompt_recipe(&library)?,
    };

    println!(
        "Pricing '{}' ({} ingredients, serves {})",
        recipe.name,
        recipe.ingredients.len(),
        recipe.effective_serves()
    );

    let mut session = CalculatorSession::new(recipe);
    let interactive = purchases.is_none();

    match purchases {
        Some(path) => {
            let entries = load_purchases(path)?;
            let count = session.entries().len();
            if entries.len() > count {
                warn!(
                    "{} purchase entries given for {} ingredients; ignoring the extra ones",
                    entries.len(),
                    count
                );
            }
            for (i, entry) in entries.into_iter().take(count).enumerate() {
                session.set_entry(i, entry)?;
            }
            session.set_margin(margin);
        }
        None => {
            let ingredients = session.recipe().ingredients.clone();
            for (i, ingredient) in ingredients.iter().enumerate() {
                let entry = prompt_purchase(ingredient)?;
                session.set_entry(i, entry)?;
                display_running_total(&session.estimate());
            }
            let margin = match margin {
                Some(m) => Some(m),
                None => prompt_margin()?,
            };
            session.set_margin(margin);
        }
    }

    let result = match session.calculate(now_millis()) {
        Ok(result) => result.clone(),
        Err(CostError::NothingPriced) => {
            println!();
            println!("Enter a quantity, unit and price for at least one ingredient to calculate.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    display_calculation(&result, Some(session.recipe()));

    let should_save = save || (interactive && prompt_yes_no("Save this calculation?", true)?);
    if should_save {
        let mut history = HistoryStore::new(store);
        let entry = history.save(result)?;
        println!("Saved as calculation {}.", entry.id);
    }

    Ok(())
}

fn load_purchases(path: &Path) -> Result<Vec<PurchaseEntry>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// List, show, delete, export or clear saved calculations.
fn cmd_history(config: &Config, action: HistoryAction) -> Result<()> {
    let mut history = HistoryStore::new(config.store());

    match action {
        HistoryAction::List => display_history(&history.list()),
        HistoryAction::Show { id } => {
            let entry = history
                .load_by_id(id)
                .ok_or(CostError::HistoryEntryNotFound(id))?;
            let library = RecipeLibrary::load(&config.library_path, history.store());
            let recipe = library.get(&entry.calculation.recipe_id);
            println!("Saved at {} (ms since epoch)", entry.saved_at);
            display_calculation(&entry.calculation, recipe);
        }
        HistoryAction::Delete { id } => {
            if history.delete(id)? {
                println!("Deleted calculation {}.", id);
            } else {
                println!("No calculation with id {}.", id);
            }
        }
        HistoryAction::Export { path } => {
            let rows = history.export_csv(&path)?;
            println!("Exported {} calculations to {}.", rows, path.display());
        }
        HistoryAction::Clear { yes } => {
            if yes || prompt_yes_no("Delete all saved calculations?", false)? {
                history.clear()?;
                println!("History cleared.");
            }
        }
    }

    Ok(())
}

/// Convert a quantity, bridging weight and volume when an ingredient density is known.
fn cmd_convert(quantity: f64, from: Unit, to: Unit, ingredient: Option<&str>) -> Result<()> {
    match convert(quantity, from, to) {
        Ok(converted) => display_conversion(quantity, from, converted, to, None),
        Err(e @ CostError::IncompatibleUnits { .. }) => {
            let density = ingredient.and_then(density_for).ok_or(e)?;
            let converted = convert_with_density(quantity, from, to, density)?;
            display_conversion(quantity, from, converted, to, Some(density));
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Add a user recipe from a JSON file.
fn cmd_add_recipe(config: &Config, file: &Path) -> Result<()> {
    let content = fs::read_to_string(file)?;
    let recipe: Recipe = serde_json::from_str(&content)?;

    let mut store = config.store();
    let mut library = RecipeLibrary::load(&config.library_path, &store);
    let name = recipe.name.clone();
    library.add_user_recipe(&mut store, recipe)?;

    println!("Added '{}'. The library now has {} recipes.", name, library.len());
    Ok(())
}
