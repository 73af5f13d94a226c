use std::fs;
use std::path::Path;

use serde_json::Value;
use strsim::jaro_winkler;
use tracing::{info, warn};

use crate::error::{CostError, Result};
use crate::models::Recipe;
use crate::state::persistence::{load_list, load_list_for_update, save_list, KeyValueStore};

/// Storage key holding recipes authored by the user.
pub const USER_RECIPES_KEY: &str = "flavorfy_user_recipes";

/// Minimum Jaro-Winkler score for a fuzzy name match.
const FUZZY_THRESHOLD: f64 = 0.8;

/// Bundled recipes plus the user's own.
#[derive(Debug, Clone, Default)]
pub struct RecipeLibrary {
    recipes: Vec<Recipe>,
}

impl RecipeLibrary {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Load the bundled library at `path` and append the user's recipes from `store`.
    ///
    /// A missing or malformed library file is logged and treated as empty.
    /// Individual recipes that fail to parse or validate are logged and skipped.
    pub fn load<P, S>(path: P, store: &S) -> Self
    where
        P: AsRef<Path>,
        S: KeyValueStore + ?Sized,
    {
        let path = path.as_ref();
        let mut recipes = load_bundled(path).unwrap_or_else(|e| {
            warn!("Could not load recipe library {}: {}", path.display(), e);
            Vec::new()
        });

        let user = parse_recipes(load_list(store, USER_RECIPES_KEY), USER_RECIPES_KEY);
        info!(
            "Loaded {} bundled and {} user recipes",
            recipes.len(),
            user.len()
        );
        recipes.extend(user);

        Self { recipes }
    }

    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Find a recipe by id, exact name (case-insensitive), or closest fuzzy name.
    pub fn find(&self, query: &str) -> Option<&Recipe> {
        let query = query.trim();
        if let Some(recipe) = self.get(query) {
            return Some(recipe);
        }

        let lowered = query.to_lowercase();
        if let Some(recipe) = self.recipes.iter().find(|r| r.name.to_lowercase() == lowered) {
            return Some(recipe);
        }

        self.recipes
            .iter()
            .map(|r| (r, jaro_winkler(&r.name.to_lowercase(), &lowered)))
            .filter(|(_, score)| *score > FUZZY_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(r, _)| r)
    }

    /// Validate and persist a user-authored recipe.
    pub fn add_user_recipe<S>(&mut self, store: &mut S, recipe: Recipe) -> Result<()>
    where
        S: KeyValueStore + ?Sized,
    {
        recipe.validate()?;
        if self.get(&recipe.id).is_some() {
            return Err(CostError::InvalidInput(format!(
                "A recipe with id '{}' already exists",
                recipe.id
            )));
        }

        // Raw values, so entries this version can't read are written back untouched.
        let mut user: Vec<Value> = load_list_for_update(&*store, USER_RECIPES_KEY)?;
        user.push(serde_json::to_value(&recipe)?);
        save_list(store, USER_RECIPES_KEY, &user)?;

        info!("Added recipe '{}' ({})", recipe.name, recipe.id);
        self.recipes.push(recipe);
        Ok(())
    }
}

fn load_bundled(path: &Path) -> Result<Vec<Recipe>> {
    let content = fs::read_to_string(path)?;
    let values: Vec<Value> = serde_json::from_str(&content)?;
    Ok(parse_recipes(values, &path.display().to_string()))
}

/// Deserialize and validate each recipe on its own, skipping the bad ones.
fn parse_recipes(values: Vec<Value>, source: &str) -> Vec<Recipe> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| {
            let parsed = serde_json::from_value::<Recipe>(value)
                .map_err(CostError::from)
                .and_then(|recipe| recipe.validate().map(|()| recipe));
            match parsed {
                Ok(recipe) => Some(recipe),
                Err(e) => {
                    warn!("Skipping recipe #{} in {}: {}", i + 1, source, e);
                    None
                }
            }
        })
        .collect()
}

/// Look up a recipe or fail with [`CostError::RecipeNotFound`].
pub fn require_recipe<'a>(library: &'a RecipeLibrary, query: &str) -> Result<&'a Recipe> {
    library
        .find(query)
        .ok_or_else(|| CostError::RecipeNotFound(query.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, Unit};
    use crate::state::persistence::MemoryStore;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn recipe(id: &str, name: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            serves: Some(2),
            ingredients: vec![Ingredient::new("flour", 1.0, Unit::Cup)],
        }
    }

    #[test]
    fn test_load_bundled_and_user() {
        let json = r#"[{"id": 1, "name": "Pancakes", "serves": 4, "ingredients": []}]"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let mut store = MemoryStore::new();
        save_list(&mut store, USER_RECIPES_KEY, &[recipe("u1", "Waffles")]).unwrap();

        let library = RecipeLibrary::load(file.path(), &store);
        assert_eq!(library.len(), 2);
        assert!(library.get("1").is_some());
        assert!(library.get("u1").is_some());
    }

    #[test]
    fn test_bad_recipes_are_skipped() {
        let json = r#"[
            {"id": 1, "name": "Pancakes", "serves": 4, "ingredients": [
                {"item": "flour", "quantity": 2, "unit": "cup"}
            ]},
            {"id": 2, "name": "Garlic Bread", "serves": 2, "ingredients": [
                {"item": "garlic", "quantity": 3, "unit": "clove"}
            ]},
            {"id": 3, "name": "Soup", "serves": 2, "ingredients": [
                {"item": "salt", "quantity": "to taste", "unit": "g"}
            ]},
            {"id": 4, "name": "Stew", "serves": 2, "ingredients": [
                {"item": "beef", "quantity": -1, "unit": "g"}
            ]}
        ]"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let library = RecipeLibrary::load(file.path(), &MemoryStore::new());
        assert_eq!(library.len(), 1);
        assert_eq!(library.get("1").unwrap().name, "Pancakes");
        assert!(library.get("2").is_none());
        assert!(library.get("3").is_none());
        assert!(library.get("4").is_none());
    }

    #[test]
    fn test_add_user_recipe_keeps_unreadable_entries() {
        let stored = r#"[{"id": "old", "name": "Odd", "ingredients": [
            {"item": "nutmeg", "quantity": 1, "unit": "pinch"}
        ]}]"#;
        let mut store = MemoryStore::new();
        store.set(USER_RECIPES_KEY, stored).unwrap();
        let mut library = RecipeLibrary::load("/nonexistent/recipes.json", &store);
        assert!(library.is_empty());

        library.add_user_recipe(&mut store, recipe("u1", "Waffles")).unwrap();
        let raw: Vec<Value> = load_list(&store, USER_RECIPES_KEY);
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0]["id"], "old");
    }

    #[test]
    fn test_missing_library_is_empty() {
        let store = MemoryStore::new();
        let library = RecipeLibrary::load("/nonexistent/recipes.json", &store);
        assert!(library.is_empty());
    }

    #[test]
    fn test_find_exact_and_fuzzy() {
        let library = RecipeLibrary::new(vec![
            recipe("1", "Banana Bread"),
            recipe("2", "Tomato Soup"),
        ]);
        assert_eq!(library.find("2").unwrap().name, "Tomato Soup");
        assert_eq!(library.find("banana bread").unwrap().id, "1");
        assert_eq!(library.find("Banana Brea").unwrap().id, "1");
        assert!(library.find("Chocolate Cake").is_none());
    }

    #[test]
    fn test_add_user_recipe_persists() {
        let mut store = MemoryStore::new();
        let mut library = RecipeLibrary::default();
        library.add_user_recipe(&mut store, recipe("u1", "Waffles")).unwrap();

        let reloaded = RecipeLibrary::load("/nonexistent/recipes.json", &store);
        assert_eq!(reloaded.len(), 1);
        assert!(library.add_user_recipe(&mut store, recipe("u1", "Again")).is_err());
    }
}
