use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Profit margin applied when the user leaves the field blank or enters nonsense.
pub const DEFAULT_PROFIT_MARGIN_PERCENT: f64 = 20.0;

/// Milliliters in the cup that density figures are quoted against.
pub const ML_PER_CUP: f64 = 240.0;

/// Ingredient densities in grams per cup, keyed by lowercase name.
pub static DENSITIES_G_PER_CUP: LazyLock<BTreeMap<&'static str, f64>> = LazyLock::new(|| {
    let mut m = BTreeMap::new();
    m.insert("flour", 120.0);
    m.insert("sugar", 200.0);
    m.insert("brown sugar", 220.0);
    m.insert("powdered sugar", 120.0);
    m.insert("butter", 227.0);
    m.insert("water", 240.0);
    m.insert("milk", 245.0);
    m.insert("cream", 240.0);
    m.insert("rice", 185.0);
    m.insert("salt", 288.0);
    m.insert("honey", 340.0);
    m.insert("oil", 218.0);
    m.insert("olive oil", 216.0);
    m.insert("cocoa", 85.0);
    m.insert("oats", 90.0);
    m
});

/// Density for an ingredient name, matching the longest known name it contains.
///
/// Matching is on whole words, so "all-purpose flour" finds "flour" while
/// "boiled eggs" does not find "oil". Between equally long names the one
/// further right in the item wins ("sugar water" is water).
pub fn density_for(item: &str) -> Option<f64> {
    let words: Vec<String> = item
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    let padded = format!(" {} ", words.join(" "));

    DENSITIES_G_PER_CUP
        .iter()
        .filter_map(|(name, density)| {
            padded
                .rfind(&format!(" {name} "))
                .map(|pos| (name.len(), pos, *density))
        })
        .max_by_key(|(len, pos, _)| (*len, *pos))
        .map(|(_, _, density)| density)
}
