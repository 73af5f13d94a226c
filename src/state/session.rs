use crate::calculator::{estimate, CostEstimate};
use crate::error::{CostError, Result};
use crate::models::{CalculationResult, PurchaseEntry, Recipe};

/// Calculator state for the recipe currently being priced.
///
/// Holds one purchase entry slot per ingredient, the raw margin input and the
/// last calculated result.
pub struct CalculatorSession {
    recipe: Recipe,
    entries: Vec<PurchaseEntry>,
    margin: Option<f64>,
    last_result: Option<CalculationResult>,
}

impl CalculatorSession {
    pub fn new(recipe: Recipe) -> Self {
        let entries = vec![PurchaseEntry::default(); recipe.ingredients.len()];
        Self {
            recipe,
            entries,
            margin: None,
            last_result: None,
        }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn entries(&self) -> &[PurchaseEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&PurchaseEntry> {
        self.entries.get(index)
    }

    pub fn set_entry(&mut self, index: usize, entry: PurchaseEntry) -> Result<()> {
        let slot = self.entries.get_mut(index).ok_or_else(|| {
            CostError::InvalidInput(format!(
                "'{}' has no ingredient #{}",
                self.recipe.name,
                index + 1
            ))
        })?;
        *slot = entry;
        Ok(())
    }

    pub fn clear_entry(&mut self, index: usize) -> Result<()> {
        self.set_entry(index, PurchaseEntry::default())
    }

    /// Raw profit margin input; `None` or invalid values fall back to the default.
    pub fn set_margin(&mut self, margin: Option<f64>) {
        self.margin = margin;
    }

    pub fn margin(&self) -> Option<f64> {
        self.margin
    }

    /// Figures for the current inputs. Never fails; unpriced ingredients are skipped.
    pub fn estimate(&self) -> CostEstimate {
        estimate(&self.recipe, &self.entries, self.margin)
    }

    /// Produce a result stamped with `timestamp` and remember it.
    ///
    /// Leaves the previous result untouched when nothing is priced.
    pub fn calculate(&mut self, timestamp: u64) -> Result<&CalculationResult> {
        let result = self.estimate().into_result(timestamp)?;
        Ok(&*self.last_result.insert(result))
    }

    pub fn last_result(&self) -> Option<&CalculationResult> {
        self.last_result.as_ref()
    }
}
