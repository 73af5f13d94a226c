use std::path::Path;

use tracing::info;

use crate::error::{CostError, Result};
use crate::models::{CalculationHistoryEntry, CalculationResult};
use crate::state::persistence::{
    load_list, load_list_for_update, now_millis, save_list, KeyValueStore,
};

/// Storage key holding the saved calculations.
pub const HISTORY_KEY: &str = "flavorfy_calculation_history";

/// Append-only log of saved calculations.
///
/// Each operation reads the stored list, changes it and writes it back.
/// Nothing coordinates two writers; the last write wins.
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All saved entries in the order they were saved.
    pub fn list(&self) -> Vec<CalculationHistoryEntry> {
        load_list(&self.store, HISTORY_KEY)
    }

    /// Append a result, stamped with the current time.
    pub fn save(&mut self, result: CalculationResult) -> Result<CalculationHistoryEntry> {
        self.save_at(result, now_millis())
    }

    /// Append a result saved at `now` (milliseconds).
    ///
    /// The id is `now`, bumped past the newest existing id if needed so ids
    /// stay unique when saves land in the same millisecond. Results with
    /// non-finite figures are refused, since JSON cannot hold them.
    pub fn save_at(
        &mut self,
        result: CalculationResult,
        now: u64,
    ) -> Result<CalculationHistoryEntry> {
        if !result.is_finite() {
            return Err(CostError::InvalidInput(format!(
                "Calculation for '{}' has non-finite costs",
                result.recipe_name
            )));
        }

        let mut entries: Vec<CalculationHistoryEntry> =
            load_list_for_update(&self.store, HISTORY_KEY)?;
        let id = entries
            .iter()
            .map(|e| e.id)
            .max()
            .map_or(now, |max_id| now.max(max_id.saturating_add(1)));

        let entry = CalculationHistoryEntry {
            id,
            saved_at: now,
            calculation: result,
        };
        entries.push(entry.clone());
        save_list(&mut self.store, HISTORY_KEY, &entries)?;

        info!(
            "Saved calculation {} for '{}' ({} entries)",
            id,
            entry.calculation.recipe_name,
            entries.len()
        );
        Ok(entry)
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: u64) -> Result<bool> {
        let mut entries: Vec<CalculationHistoryEntry> =
            load_list_for_update(&self.store, HISTORY_KEY)?;
        let before = entries.len();
        entries.retain(|e| e.id != id);

        if entries.len() == before {
            return Ok(false);
        }

        save_list(&mut self.store, HISTORY_KEY, &entries)?;
        info!("Deleted calculation {id}");
        Ok(true)
    }

    pub fn load_by_id(&self, id: u64) -> Option<CalculationHistoryEntry> {
        self.list().into_iter().find(|e| e.id == id)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(HISTORY_KEY)
    }

    /// Write the history as CSV. Returns the number of rows written.
    pub fn export_csv(&self, path: &Path) -> Result<usize> {
        let entries = self.list();
        let mut wtr = csv::Writer::from_path(path)?;

        wtr.write_record([
            "id",
            "saved_at",
            "recipe_id",
            "recipe_name",
            "serves",
            "total_cost",
            "cost_per_portion",
            "included_ingredients",
            "total_ingredients",
            "margin_percent",
            "suggested_price_per_portion",
            "total_sale_price",
            "expected_profit",
        ])?;

        for entry in &entries {
            let calc = &entry.calculation;
            wtr.write_record([
                entry.id.to_string(),
                entry.saved_at.to_string(),
                calc.recipe_id.clone(),
                calc.recipe_name.clone(),
                calc.serves.to_string(),
                format!("{:.2}", calc.total_cost),
                format!("{:.2}", calc.cost_per_portion),
                calc.included_ingredients.to_string(),
                calc.total_ingredients.to_string(),
                format!("{:.1}", calc.pricing.margin_percent),
                format!("{:.2}", calc.pricing.suggested_price_per_portion),
                format!("{:.2}", calc.pricing.total_sale_price),
                format!("{:.2}", calc.pricing.expected_profit),
            ])?;
        }

        wtr.flush()?;
        Ok(entries.len())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
