use assert_float_eq::assert_float_absolute_eq;

use flavorfy_cost::calculator::{
    calculate, convert, convert_or_identity, estimate, ingredient_cost, suggest_pricing,
};
use flavorfy_cost::models::{CostBasis, Ingredient, PurchaseEntry, Recipe, Unit, UnitFamily};

const WEIGHT: [Unit; 4] = [Unit::Gram, Unit::Kilogram, Unit::Pound, Unit::Ounce];
const VOLUME: [Unit; 9] = [
    Unit::Milliliter,
    Unit::Liter,
    Unit::Cup,
    Unit::Tablespoon,
    Unit::Teaspoon,
    Unit::FluidOunce,
    Unit::Pint,
    Unit::Quart,
    Unit::Gallon,
];

fn make_recipe(serves: Option<i64>, ingredients: Vec<Ingredient>) -> Recipe {
    Recipe {
        id: "42".to_string(),
        name: "Test Recipe".to_string(),
        serves,
        ingredients,
    }
}

#[test]
fn test_convert_identity_for_every_unit() {
    for unit in Unit::ALL {
        for q in [0.0, 0.1, 1.0, 12.5, 1e6] {
            assert_eq!(convert(q, unit, unit).unwrap(), q);
        }
    }
}

#[test]
fn test_convert_round_trip_within_family() {
    for family in [&WEIGHT[..], &VOLUME[..]] {
        for &a in family {
            for &b in family {
                let there = convert(7.25, a, b).unwrap();
                let back = convert(there, b, a).unwrap();
                assert_float_absolute_eq!(back, 7.25, 1e-9);
            }
        }
    }
}

#[test]
fn test_cross_family_never_panics() {
    for &w in &WEIGHT {
        for &v in &VOLUME {
            assert!(convert(3.0, w, v).is_err());
            assert_eq!(convert_or_identity(3.0, w, v), 3.0);
            assert_eq!(convert_or_identity(3.0, Unit::Piece, v), 3.0);
        }
    }
    assert_eq!(Unit::Piece.family(), UnitFamily::Count);
}

#[test]
fn test_same_unit_cost_is_exact_ratio() {
    // Q=3 tbsp, bought P=20 tbsp for $X=5 -> 3 * (5 / 20)
    let ingredient = Ingredient::new("vanilla", 3.0, Unit::Tablespoon);
    let entry = PurchaseEntry::new(20.0, Unit::Tablespoon, 5.0);
    let cost = ingredient_cost(&ingredient, &entry).unwrap();
    assert_eq!(cost.recipe_cost, 3.0 * (5.0 / 20.0));
    assert_eq!(cost.basis, CostBasis::Exact);
}

#[test]
fn test_two_conversion_paths_agree() {
    // Recipe wants 1.5 cups of milk; bought a gallon for $4.20.
    let q = 1.5;
    let ingredient = Ingredient::new("milk", q, Unit::Cup);
    let entry = PurchaseEntry::new(1.0, Unit::Gallon, 4.2);
    let via_unit_cost = ingredient_cost(&ingredient, &entry).unwrap().recipe_cost;

    let q_in_gallons = convert(q, Unit::Cup, Unit::Gallon).unwrap();
    let direct = q_in_gallons * (4.2 / 1.0);

    assert_float_absolute_eq!(via_unit_cost, direct, 1e-9);
}

#[test]
fn test_flour_example() {
    let ingredient = Ingredient::new("flour", 2.0, Unit::Cup);
    let entry = PurchaseEntry::new(1000.0, Unit::Gram, 2.0);
    let cost = ingredient_cost(&ingredient, &entry).unwrap();
    assert_float_absolute_eq!(cost.unit_cost, 0.24, 1e-9);
    assert_float_absolute_eq!(cost.recipe_cost, 0.48, 1e-9);
}

#[test]
fn test_incomplete_entry_never_changes_total() {
    let recipe = make_recipe(
        Some(2),
        vec![
            Ingredient::new("rice", 200.0, Unit::Gram),
            Ingredient::new("stock", 500.0, Unit::Milliliter),
        ],
    );
    let priced = PurchaseEntry::new(1.0, Unit::Kilogram, 3.0);

    let base = estimate(&recipe, &[priced.clone()], None);
    let incomplete = [
        PurchaseEntry::from_text("1", "l", ""),
        PurchaseEntry::from_text("", "l", "2"),
        PurchaseEntry::from_text("1", "bucket", "2"),
        PurchaseEntry::from_text("zero", "l", "2"),
    ];
    for entry in incomplete {
        let with = estimate(&recipe, &[priced.clone(), entry], None);
        assert_eq!(with.total_cost, base.total_cost);
        assert_eq!(with.included_ingredients, 1);
    }
}

#[test]
fn test_cost_per_portion() {
    let recipe = make_recipe(Some(1), vec![Ingredient::new("beans", 400.0, Unit::Gram)]);
    let est = estimate(&recipe, &[PurchaseEntry::new(400.0, Unit::Gram, 1.6)], None);
    assert_eq!(est.cost_per_portion, est.total_cost);

    let recipe = make_recipe(Some(4), recipe.ingredients.clone());
    let est = estimate(&recipe, &[PurchaseEntry::new(400.0, Unit::Gram, 1.6)], None);
    assert_float_absolute_eq!(est.cost_per_portion, est.total_cost / 4.0, 1e-12);
}

#[test]
fn test_pricing_example() {
    // serves 4, $12.00 total -> $3.00 per portion; 25% margin
    let recipe = make_recipe(Some(4), vec![Ingredient::new("cheese", 1.0, Unit::Kilogram)]);
    let result = calculate(
        &recipe,
        &[PurchaseEntry::new(1.0, Unit::Kilogram, 12.0)],
        Some(25.0),
        1_700_000_000_000,
    )
    .unwrap();

    assert_float_absolute_eq!(result.cost_per_portion, 3.0, 1e-9);
    assert_float_absolute_eq!(result.pricing.suggested_price_per_portion, 3.75, 1e-9);
    assert_float_absolute_eq!(result.pricing.total_sale_price, 15.0, 1e-9);
    assert_float_absolute_eq!(result.pricing.expected_profit, 3.0, 1e-9);

    let direct = suggest_pricing(3.0, 4, 25.0);
    assert_eq!(result.pricing, direct);
}

#[test]
fn test_to_taste_without_actual_is_excluded() {
    let recipe = make_recipe(
        Some(2),
        vec![
            Ingredient::new("pasta", 250.0, Unit::Gram),
            Ingredient::to_taste("parmesan"),
        ],
    );
    let entries = [
        PurchaseEntry::new(500.0, Unit::Gram, 1.0),
        PurchaseEntry::new(200.0, Unit::Gram, 4.0),
    ];
    let est = estimate(&recipe, &entries, None);
    assert_eq!(est.included_ingredients, 1);
    assert_float_absolute_eq!(est.total_cost, 0.5, 1e-12);

    let entries = [
        entries[0].clone(),
        entries[1].clone().with_actual(30.0, Unit::Gram),
    ];
    let est = estimate(&recipe, &entries, None);
    assert_eq!(est.included_ingredients, 2);
    assert_float_absolute_eq!(est.total_cost, 0.5 + 0.6, 1e-12);
}

#[test]
fn test_approximate_costs_are_flagged() {
    let recipe = make_recipe(Some(1), vec![Ingredient::new("lemons", 2.0, Unit::Piece)]);
    let result = calculate(
        &recipe,
        &[PurchaseEntry::new(1.0, Unit::Kilogram, 3.0)],
        None,
        1,
    )
    .unwrap();
    assert!(result.has_approximations());
    assert_eq!(result.total_cost, 6.0);
}
