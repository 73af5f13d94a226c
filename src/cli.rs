use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::Unit;

/// Flavorfy cost calculator: price recipes, suggest sale prices, keep a history.
#[derive(Parser, Debug)]
#[command(name = "flavorfy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the bundled recipe library (JSON array of recipes).
    #[arg(short, long, global = true, env = "FLAVORFY_LIBRARY", default_value = "recipes.json")]
    pub library: PathBuf,

    /// Directory holding saved history and user recipes.
    #[arg(short, long, global = true, env = "FLAVORFY_DATA_DIR", default_value = ".flavorfy")]
    pub data_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the recipes in the library.
    Recipes,

    /// Price a recipe's ingredients and suggest a sale price.
    Calculate {
        /// Recipe id or name (prompted for if omitted).
        #[arg(short, long)]
        recipe: Option<String>,

        /// JSON file with one purchase entry per ingredient, in recipe order.
        #[arg(short, long)]
        purchases: Option<PathBuf>,

        /// Profit margin in percent (defaults to 20).
        #[arg(short, long)]
        margin: Option<f64>,

        /// Save the result to history without asking.
        #[arg(long)]
        save: bool,
    },

    /// Inspect and manage saved calculations.
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Convert a quantity between units.
    Convert {
        quantity: f64,
        from: Unit,
        to: Unit,

        /// Ingredient name, used to bridge weight and volume by density.
        #[arg(short, long)]
        ingredient: Option<String>,
    },

    /// Add a recipe of your own from a JSON file.
    AddRecipe {
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug, Default)]
pub enum HistoryAction {
    /// List saved calculations.
    #[default]
    List,

    /// Show one saved calculation in full.
    Show { id: u64 },

    /// Delete a saved calculation.
    Delete { id: u64 },

    /// Export the history as CSV.
    Export { path: PathBuf },

    /// Delete every saved calculation.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Calculate {
            recipe: None,
            purchases: None,
            margin: None,
            save: false,
        }
    }
}
