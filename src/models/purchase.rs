use serde::{Deserialize, Serialize};

use crate::models::Unit;

/// What the user paid for an ingredient, as typed in.
///
/// Every field is optional: a half-filled entry is the normal state while the
/// user is still entering data and simply does not count toward totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseEntry {
    #[serde(default)]
    pub purchase_quantity: Option<f64>,

    #[serde(default)]
    pub purchase_unit: Option<Unit>,

    #[serde(default)]
    pub purchase_price: Option<f64>,

    /// How much of a "to taste" ingredient the user plans to use.
    #[serde(default)]
    pub actual_quantity: Option<f64>,

    #[serde(default)]
    pub actual_unit: Option<Unit>,
}

/// A purchase with every required field present and valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletePurchase {
    pub quantity: f64,
    pub unit: Unit,
    pub price: f64,
}

impl PurchaseEntry {
    pub fn new(quantity: f64, unit: Unit, price: f64) -> Self {
        Self {
            purchase_quantity: Some(quantity),
            purchase_unit: Some(unit),
            purchase_price: Some(price),
            actual_quantity: None,
            actual_unit: None,
        }
    }

    /// Attach the planned amount for a "to taste" ingredient.
    pub fn with_actual(mut self, quantity: f64, unit: Unit) -> Self {
        self.actual_quantity = Some(quantity);
        self.actual_unit = Some(unit);
        self
    }

    /// Build an entry from raw form text. Blank or unparseable fields become `None`.
    pub fn from_text(quantity: &str, unit: &str, price: &str) -> Self {
        Self {
            purchase_quantity: parse_number(quantity),
            purchase_unit: unit.parse().ok(),
            purchase_price: parse_number(price),
            actual_quantity: None,
            actual_unit: None,
        }
    }

    /// The purchase, if quantity and price are positive numbers and a unit is set.
    pub fn complete(&self) -> Option<CompletePurchase> {
        let quantity = self.purchase_quantity.filter(|q| is_positive(*q))?;
        let price = self.purchase_price.filter(|p| is_positive(*p))?;
        let unit = self.purchase_unit?;
        Some(CompletePurchase {
            quantity,
            unit,
            price,
        })
    }

    /// The planned amount for a "to taste" ingredient, if fully entered.
    pub fn actual(&self) -> Option<(f64, Unit)> {
        let quantity = self.actual_quantity.filter(|q| is_positive(*q))?;
        Some((quantity, self.actual_unit?))
    }
}

/// Lenient numeric parse for form fields; accepts a leading currency sign.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim().trim_start_matches('$').trim();
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
