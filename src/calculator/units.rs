use tracing::debug;

use crate::calculator::constants::ML_PER_CUP;
use crate::error::{CostError, Result};
use crate::models::{Unit, UnitFamily};

/// Convert a quantity between two units of the same family.
///
/// `convert(q, u, u)` returns `q` untouched. Units from different families
/// fail with [`CostError::IncompatibleUnits`].
pub fn convert(quantity: f64, from: Unit, to: Unit) -> Result<f64> {
    if from == to {
        return Ok(quantity);
    }
    if from.family() != to.family() {
        return Err(CostError::IncompatibleUnits { from, to });
    }
    Ok(quantity * from.base_factor() / to.base_factor())
}

/// Like [`convert`], but hands back the original quantity when the units don't mix.
pub fn convert_or_identity(quantity: f64, from: Unit, to: Unit) -> f64 {
    convert(quantity, from, to).unwrap_or_else(|e| {
        debug!("{e}; keeping {quantity} {from}");
        quantity
    })
}

/// Convert between weight and volume using a density in grams per cup.
///
/// Same-family pairs go through [`convert`]; count units never bridge.
pub fn convert_with_density(quantity: f64, from: Unit, to: Unit, grams_per_cup: f64) -> Result<f64> {
    if !(grams_per_cup.is_finite() && grams_per_cup > 0.0) {
        return Err(CostError::InvalidInput(format!(
            "Invalid density: {grams_per_cup} g/cup"
        )));
    }

    let grams_per_ml = grams_per_cup / ML_PER_CUP;
    match (from.family(), to.family()) {
        (a, b) if a == b => convert(quantity, from, to),
        (UnitFamily::Volume, UnitFamily::Weight) => {
            let grams = quantity * from.base_factor() * grams_per_ml;
            Ok(grams / to.base_factor())
        }
        (UnitFamily::Weight, UnitFamily::Volume) => {
            let ml = quantity * from.base_factor() / grams_per_ml;
            Ok(ml / to.base_factor())
        }
        _ => Err(CostError::IncompatibleUnits { from, to }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    #[test]
    fn test_identity() {
        for unit in Unit::ALL {
            assert_eq!(convert(3.7, unit, unit).unwrap(), 3.7);
        }
    }

    #[test]
    fn test_same_family() {
        assert_float_absolute_eq!(convert(2.0, Unit::Kilogram, Unit::Gram).unwrap(), 2000.0, 1e-9);
        assert_float_absolute_eq!(convert(1.0, Unit::Cup, Unit::Tablespoon).unwrap(), 16.0, 1e-9);
        assert_float_absolute_eq!(convert(1.0, Unit::Pound, Unit::Gram).unwrap(), 453.592, 1e-9);
    }

    #[test]
    fn test_incompatible_families() {
        let err = convert(1.0, Unit::Gram, Unit::Milliliter).unwrap_err();
        assert!(matches!(
            err,
            CostError::IncompatibleUnits {
                from: Unit::Gram,
                to: Unit::Milliliter
            }
        ));
        assert!(convert(1.0, Unit::Piece, Unit::Kilogram).is_err());
    }

    #[test]
    fn test_convert_or_identity_falls_back() {
        assert_eq!(convert_or_identity(5.0, Unit::Piece, Unit::Cup), 5.0);
        assert_float_absolute_eq!(convert_or_identity(1.0, Unit::Liter, Unit::Milliliter), 1000.0, 1e-9);
    }

    #[test]
    fn test_density_bridge() {
        // 2 cups of flour at 120 g/cup
        assert_float_absolute_eq!(
            convert_with_density(2.0, Unit::Cup, Unit::Gram, 120.0).unwrap(),
            240.0,
            1e-9
        );
        assert_float_absolute_eq!(
            convert_with_density(240.0, Unit::Gram, Unit::Cup, 120.0).unwrap(),
            2.0,
            1e-9
        );
        assert!(convert_with_density(1.0, Unit::Piece, Unit::Gram, 120.0).is_err());
        assert!(convert_with_density(1.0, Unit::Cup, Unit::Gram, 0.0).is_err());
    }
}
