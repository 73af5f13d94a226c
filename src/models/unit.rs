use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CostError;

/// Physical quantity a unit measures. Units only convert within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    /// Base unit: gram.
    Weight,
    /// Base unit: milliliter.
    Volume,
    /// Base unit: piece.
    Count,
}

impl fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitFamily::Weight => "weight",
            UnitFamily::Volume => "volume",
            UnitFamily::Count => "count",
        };
        f.write_str(name)
    }
}

/// The fixed unit vocabulary used by recipes and purchases.
///
/// Serialized as the canonical short name (`"g"`, `"fl-oz"`, ...). Parsing
/// also accepts common spellings such as `"grams"` or `"Tablespoons"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    Gram,
    Kilogram,
    Pound,
    Ounce,
    Milliliter,
    Liter,
    Cup,
    Tablespoon,
    Teaspoon,
    FluidOunce,
    Pint,
    Quart,
    Gallon,
    Piece,
}

impl Unit {
    pub const ALL: [Unit; 14] = [
        Unit::Gram,
        Unit::Kilogram,
        Unit::Pound,
        Unit::Ounce,
        Unit::Milliliter,
        Unit::Liter,
        Unit::Cup,
        Unit::Tablespoon,
        Unit::Teaspoon,
        Unit::FluidOunce,
        Unit::Pint,
        Unit::Quart,
        Unit::Gallon,
        Unit::Piece,
    ];

    pub fn family(self) -> UnitFamily {
        match self {
            Unit::Gram | Unit::Kilogram | Unit::Pound | Unit::Ounce => UnitFamily::Weight,
            Unit::Milliliter
            | Unit::Liter
            | Unit::Cup
            | Unit::Tablespoon
            | Unit::Teaspoon
            | Unit::FluidOunce
            | Unit::Pint
            | Unit::Quart
            | Unit::Gallon => UnitFamily::Volume,
            Unit::Piece => UnitFamily::Count,
        }
    }

    /// How many of the family's base unit one of `self` is worth.
    pub fn base_factor(self) -> f64 {
        match self {
            Unit::Gram => 1.0,
            Unit::Kilogram => 1000.0,
            Unit::Pound => 453.592,
            Unit::Ounce => 28.3495,
            Unit::Milliliter => 1.0,
            Unit::Liter => 1000.0,
            Unit::Cup => 240.0,
            Unit::Tablespoon => 15.0,
            Unit::Teaspoon => 5.0,
            Unit::FluidOunce => 29.5735,
            Unit::Pint => 473.176,
            Unit::Quart => 946.353,
            Unit::Gallon => 3785.41,
            Unit::Piece => 1.0,
        }
    }

    /// Canonical short name.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Pound => "lb",
            Unit::Ounce => "oz",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Cup => "cup",
            Unit::Tablespoon => "tbsp",
            Unit::Teaspoon => "tsp",
            Unit::FluidOunce => "fl-oz",
            Unit::Pint => "pint",
            Unit::Quart => "quart",
            Unit::Gallon => "gallon",
            Unit::Piece => "piece",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '.'], " ");
        let normalized = normalized.split_whitespace().collect::<Vec<_>>().join("-");

        let unit = match normalized.as_str() {
            "g" | "gr" | "gram" | "grams" => Unit::Gram,
            "kg" | "kilo" | "kilos" | "kilogram" | "kilograms" => Unit::Kilogram,
            "lb" | "lbs" | "pound" | "pounds" => Unit::Pound,
            "oz" | "ounce" | "ounces" => Unit::Ounce,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Unit::Milliliter
            }
            "l" | "liter" | "liters" | "litre" | "litres" => Unit::Liter,
            "cup" | "cups" | "c" => Unit::Cup,
            "tbsp" | "tbs" | "tablespoon" | "tablespoons" => Unit::Tablespoon,
            "tsp" | "teaspoon" | "teaspoons" => Unit::Teaspoon,
            "fl-oz" | "floz" | "fluid-ounce" | "fluid-ounces" => Unit::FluidOunce,
            "pint" | "pints" | "pt" => Unit::Pint,
            "quart" | "quarts" | "qt" => Unit::Quart,
            "gallon" | "gallons" | "gal" => Unit::Gallon,
            "piece" | "pieces" | "pc" | "pcs" | "unit" | "units" | "whole" => Unit::Piece,
            _ => return Err(CostError::UnknownUnit(s.to_string())),
        };
        Ok(unit)
    }
}

impl TryFrom<String> for Unit {
    type Error = CostError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.symbol().to_string()
    }
}
