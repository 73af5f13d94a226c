use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CostError, Result};
use crate::models::Unit;

/// Text stored in place of a number for open-ended ingredients.
pub const TO_TASTE: &str = "to taste";

/// How much of an ingredient a recipe calls for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQuantity", into = "RawQuantity")]
pub enum Quantity {
    Amount(f64),
    ToTaste,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Number(f64),
    Text(String),
}

impl TryFrom<RawQuantity> for Quantity {
    type Error = CostError;

    fn try_from(raw: RawQuantity) -> Result<Self> {
        match raw {
            RawQuantity::Number(n) => Ok(Quantity::Amount(n)),
            RawQuantity::Text(text) => {
                let trimmed = text.trim();
                if trimmed.eq_ignore_ascii_case(TO_TASTE) {
                    return Ok(Quantity::ToTaste);
                }
                trimmed
                    .parse()
                    .map(Quantity::Amount)
                    .map_err(|_| CostError::InvalidInput(format!("Invalid quantity: {text}")))
            }
        }
    }
}

impl From<Quantity> for RawQuantity {
    fn from(quantity: Quantity) -> Self {
        match quantity {
            Quantity::Amount(n) => RawQuantity::Number(n),
            Quantity::ToTaste => RawQuantity::Text(TO_TASTE.to_string()),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Amount(n) => write!(f, "{n}"),
            Quantity::ToTaste => f.write_str(TO_TASTE),
        }
    }
}

/// A single line of a recipe's ingredient list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item: String,
    pub quantity: Quantity,
    #[serde(default)]
    pub unit: Option<Unit>,
}

impl Ingredient {
    pub fn new(item: &str, quantity: f64, unit: Unit) -> Self {
        Self {
            item: item.to_string(),
            quantity: Quantity::Amount(quantity),
            unit: Some(unit),
        }
    }

    pub fn to_taste(item: &str) -> Self {
        Self {
            item: item.to_string(),
            quantity: Quantity::ToTaste,
            unit: None,
        }
    }

    pub fn is_to_taste(&self) -> bool {
        matches!(self.quantity, Quantity::ToTaste)
    }

    /// The fixed amount and unit the recipe asks for, if this is an essential ingredient.
    pub fn required(&self) -> Option<(f64, Unit)> {
        match (self.quantity, self.unit) {
            (Quantity::Amount(q), Some(unit)) => Some((q, unit)),
            _ => None,
        }
    }

    /// Essential ingredients carry a positive amount and a unit; "to taste" carries neither.
    pub fn is_valid(&self) -> bool {
        match (self.quantity, self.unit) {
            (Quantity::Amount(q), Some(_)) => q.is_finite() && q > 0.0,
            (Quantity::ToTaste, None) => true,
            _ => false,
        }
    }
}

/// A recipe as held by the recipe library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub serves: Option<i64>,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Servings used for per-portion figures. Missing, zero or negative counts floor to 1.
    pub fn effective_serves(&self) -> u32 {
        match self.serves {
            Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => 1,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CostError::InvalidInput("Recipe id is empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(CostError::InvalidInput("Recipe name is empty".to_string()));
        }
        if let Some(bad) = self.ingredients.iter().find(|i| !i.is_valid()) {
            return Err(CostError::InvalidInput(format!(
                "Ingredient '{}' must have either a positive quantity with a unit or be \"{}\" without one",
                bad.item, TO_TASTE
            )));
        }
        Ok(())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Float(n) => n.to_string(),
    })
}
