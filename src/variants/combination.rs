//! Variant combinations: generation and reconciliation
//!
//! A combination is one pick per attribute, identified by its key, e.g.
//! `"Red / M"`. Generation walks the Cartesian product odometer-style (the
//! right-most attribute advances first), so keys come out in the same order
//! as nested loops over the attributes.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::VariantError;

use super::attribute::{VariantAttribute, DEFAULT_VARIANT};

/// Joins option values into a combination key
pub const KEY_SEPARATOR: &str = " / ";

/// A sellable variant of a product
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantCombination {
    pub key: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl VariantCombination {
    /// Zero-valued combination for a key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            price: Decimal::ZERO,
            stock: 0,
            thumbnail: None,
        }
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn is_default(&self) -> bool {
        self.key == DEFAULT_VARIANT
    }

    /// Option values making up the key
    pub fn key_parts(&self) -> impl Iterator<Item = &str> {
        self.key.split(KEY_SEPARATOR)
    }
}

/// Build every combination of the attributes' options, zero-valued.
///
/// - no attributes: no combinations
/// - a single attribute with no name yet: the one `default` combination
/// - an attribute with no options: no combinations
///
/// Repeated option values within an attribute are ignored after their first
/// occurrence, so keys stay unique.
pub fn generate_combinations(attributes: &[VariantAttribute]) -> Vec<VariantCombination> {
    if attributes.is_empty() {
        return Vec::new();
    }
    if let [only] = attributes {
        if only.is_placeholder() {
            return vec![VariantCombination::new(DEFAULT_VARIANT)];
        }
    }

    let pools: Vec<Vec<&str>> = attributes
        .iter()
        .map(VariantAttribute::distinct_options)
        .collect();
    if pools.iter().any(Vec::is_empty) {
        debug!("an attribute has no options, no combinations");
        return Vec::new();
    }

    let total = pools.iter().map(Vec::len).product();
    let mut combinations = Vec::with_capacity(total);
    let mut seen = HashSet::with_capacity(total);
    let mut indices = vec![0usize; pools.len()];

    loop {
        let key = indices
            .iter()
            .zip(&pools)
            .map(|(&i, pool)| pool[i])
            .collect::<Vec<_>>()
            .join(KEY_SEPARATOR);

        // Only reachable when option values embed the separator
        if seen.insert(key.clone()) {
            combinations.push(VariantCombination::new(key));
        } else {
            warn!(key = %key, "combination key collides, skipping");
        }

        if !advance(&mut indices, &pools) {
            break;
        }
    }

    debug!(
        attributes = attributes.len(),
        combinations = combinations.len(),
        "generated variant combinations"
    );
    combinations
}

/// Step the odometer, right-most index first. False once every index wrapped.
fn advance(indices: &mut [usize], pools: &[Vec<&str>]) -> bool {
    for i in (0..indices.len()).rev() {
        indices[i] += 1;
        if indices[i] < pools[i].len() {
            return true;
        }
        indices[i] = 0;
    }
    false
}

/// Carry persisted price/stock/thumbnail over to freshly generated keys.
///
/// Output follows `fresh`. Persisted entries whose key is no longer
/// generated are dropped; if `persisted` repeats a key the first entry wins.
pub fn reconcile(
    fresh: &[VariantCombination],
    persisted: &[VariantCombination],
) -> Vec<VariantCombination> {
    let mut by_key: HashMap<&str, &VariantCombination> = HashMap::with_capacity(persisted.len());
    for combination in persisted {
        by_key.entry(combination.key.as_str()).or_insert(combination);
    }

    let reconciled: Vec<VariantCombination> = fresh
        .iter()
        .map(|f| match by_key.get(f.key.as_str()) {
            Some(kept) => (*kept).clone(),
            None => f.clone(),
        })
        .collect();

    let fresh_keys: HashSet<&str> = fresh.iter().map(|f| f.key.as_str()).collect();
    let dropped = by_key
        .keys()
        .filter(|key| !fresh_keys.contains(*key))
        .count();
    if dropped > 0 {
        debug!(dropped, "dropped combinations no longer generated");
    }

    reconciled
}

/// Check combinations before they are submitted: prices non-negative, keys unique
pub fn validate_combinations(combinations: &[VariantCombination]) -> Result<(), VariantError> {
    let mut seen = HashSet::with_capacity(combinations.len());
    for combination in combinations {
        if combination.price.is_sign_negative() && !combination.price.is_zero() {
            return Err(VariantError::NegativePrice {
                key: combination.key.clone(),
            });
        }
        if !seen.insert(combination.key.as_str()) {
            return Err(VariantError::DuplicateKey {
                key: combination.key.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::attribute::reset_to_default;

    fn keys(combinations: &[VariantCombination]) -> Vec<&str> {
        combinations.iter().map(|c| c.key.as_str()).collect()
    }

    #[test]
    fn test_right_most_varies_fastest() {
        let combinations = generate_combinations(&[
            VariantAttribute::new("Color", ["Red", "Blue"]),
            VariantAttribute::new("Size", ["S", "M"]),
        ]);
        assert_eq!(
            keys(&combinations),
            vec!["Red / S", "Red / M", "Blue / S", "Blue / M"]
        );
        assert!(combinations
            .iter()
            .all(|c| c.price.is_zero() && c.stock == 0 && c.thumbnail.is_none()));
    }

    #[test]
    fn test_three_attributes() {
        let combinations = generate_combinations(&[
            VariantAttribute::new("Size", ["S", "L"]),
            VariantAttribute::new("Crust", ["Thin"]),
            VariantAttribute::new("Sauce", ["Red", "White", "Pesto"]),
        ]);
        assert_eq!(combinations.len(), 6);
        assert_eq!(combinations[0].key, "S / Thin / Red");
        assert_eq!(combinations[2].key, "S / Thin / Pesto");
        assert_eq!(combinations[3].key, "L / Thin / Red");
    }

    #[test]
    fn test_empty_attributes() {
        assert!(generate_combinations(&[]).is_empty());
    }

    #[test]
    fn test_sole_placeholder_is_default() {
        let combinations = generate_combinations(&[VariantAttribute::blank()]);
        assert_eq!(keys(&combinations), vec!["default"]);
        assert!(combinations[0].is_default());
    }

    #[test]
    fn test_sentinel_is_default() {
        let combinations = generate_combinations(&reset_to_default());
        assert_eq!(keys(&combinations), vec!["default"]);
    }

    #[test]
    fn test_attribute_without_options() {
        let combinations = generate_combinations(&[
            VariantAttribute::new("Color", ["Red"]),
            VariantAttribute::new("Size", Vec::<String>::new()),
        ]);
        assert!(combinations.is_empty());
    }

    #[test]
    fn test_repeated_options_collapse() {
        let combinations =
            generate_combinations(&[VariantAttribute::new("Size", ["S", "M", "S"])]);
        assert_eq!(keys(&combinations), vec!["S", "M"]);
    }

    #[test]
    fn test_separator_collision_skipped() {
        let combinations = generate_combinations(&[
            VariantAttribute::new("A", ["x / y", "x"]),
            VariantAttribute::new("B", ["z", "y / z"]),
        ]);
        assert_eq!(keys(&combinations), vec!["x / y / z", "x / y / y / z", "x / z"]);
    }

    #[test]
    fn test_reconcile_keeps_persisted_values() {
        let persisted = vec![
            VariantCombination::new("Red / S")
                .with_price(Decimal::new(10, 0))
                .with_stock(4)
                .with_thumbnail("red-s.png"),
            VariantCombination::new("Green / S").with_price(Decimal::new(7, 0)),
        ];
        let fresh = vec![
            VariantCombination::new("Red / S"),
            VariantCombination::new("Red / M"),
        ];

        let reconciled = reconcile(&fresh, &persisted);
        assert_eq!(reconciled, vec![persisted[0].clone(), fresh[1].clone()]);
    }

    #[test]
    fn test_reconcile_follows_fresh_order() {
        let persisted = vec![
            VariantCombination::new("b").with_stock(2),
            VariantCombination::new("a").with_stock(1),
        ];
        let fresh = vec![VariantCombination::new("a"), VariantCombination::new("b")];
        assert_eq!(keys(&reconcile(&fresh, &persisted)), vec!["a", "b"]);
    }

    #[test]
    fn test_reconcile_first_persisted_duplicate_wins() {
        let persisted = vec![
            VariantCombination::new("a").with_stock(1),
            VariantCombination::new("a").with_stock(9),
        ];
        let reconciled = reconcile(&[VariantCombination::new("a")], &persisted);
        assert_eq!(reconciled[0].stock, 1);
    }

    #[test]
    fn test_validate_combinations() {
        let good = vec![
            VariantCombination::new("a").with_price(Decimal::new(1999, 2)),
            VariantCombination::new("b"),
        ];
        assert!(validate_combinations(&good).is_ok());

        let negative = vec![VariantCombination::new("a").with_price(Decimal::new(-1, 0))];
        assert_eq!(
            validate_combinations(&negative),
            Err(VariantError::NegativePrice { key: "a".into() })
        );

        let duplicate = vec![VariantCombination::new("a"), VariantCombination::new("a")];
        assert_eq!(
            validate_combinations(&duplicate),
            Err(VariantError::DuplicateKey { key: "a".into() })
        );
    }

    #[test]
    fn test_key_parts() {
        let combination = VariantCombination::new("Red / M");
        assert_eq!(combination.key_parts().collect::<Vec<_>>(), vec!["Red", "M"]);
    }

    #[test]
    fn test_json_defaults_missing_fields() {
        let combination: VariantCombination =
            serde_json::from_str(r#"{"key": "Red / S", "price": "12.50"}"#).unwrap();
        assert_eq!(combination.price, Decimal::new(1250, 2));
        assert_eq!(combination.stock, 0);
        assert_eq!(combination.thumbnail, None);
    }
}
