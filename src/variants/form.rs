//! Product variant form state
//!
//! Holds what the admin product form edits: the attribute list and the
//! combinations derived from it. After every attribute edit the combinations
//! are regenerated and reconciled against the previous set, so prices and
//! stock typed into surviving variants are not lost.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::VariantError;

use super::attribute::{self as edit, VariantAttribute};
use super::combination::{
    generate_combinations, reconcile, validate_combinations, VariantCombination,
};

/// Deserialized forms are rebuilt with [`VariantForm::from_persisted`], so the
/// stored combinations only supply values for keys the attributes generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredForm")]
pub struct VariantForm {
    attributes: Vec<VariantAttribute>,
    combinations: Vec<VariantCombination>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredForm {
    attributes: Vec<VariantAttribute>,
    #[serde(default)]
    combinations: Vec<VariantCombination>,
}

impl From<StoredForm> for VariantForm {
    fn from(stored: StoredForm) -> Self {
        Self::from_persisted(stored.attributes, &stored.combinations)
    }
}

impl Default for VariantForm {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantForm {
    /// New product: no configurable variants
    pub fn new() -> Self {
        let attributes = edit::reset_to_default();
        let combinations = generate_combinations(&attributes);
        Self {
            attributes,
            combinations,
        }
    }

    /// Existing product loaded from the API
    pub fn from_persisted(
        attributes: Vec<VariantAttribute>,
        persisted: &[VariantCombination],
    ) -> Self {
        let fresh = generate_combinations(&attributes);
        let combinations = reconcile(&fresh, persisted);
        Self {
            attributes,
            combinations,
        }
    }

    pub fn attributes(&self) -> &[VariantAttribute] {
        &self.attributes
    }

    pub fn combinations(&self) -> &[VariantCombination] {
        &self.combinations
    }

    pub fn combination(&self, key: &str) -> Option<&VariantCombination> {
        self.combinations.iter().find(|c| c.key == key)
    }

    pub fn into_parts(self) -> (Vec<VariantAttribute>, Vec<VariantCombination>) {
        (self.attributes, self.combinations)
    }

    pub fn add_attribute(&mut self) {
        let next = edit::add_attribute(&self.attributes);
        self.apply(next);
    }

    pub fn remove_attribute(&mut self, index: usize) -> Result<(), VariantError> {
        let next = edit::remove_attribute(&self.attributes, index)?;
        self.apply(next);
        Ok(())
    }

    pub fn rename_attribute(
        &mut self,
        index: usize,
        kind: impl Into<String>,
    ) -> Result<(), VariantError> {
        let next = edit::rename_attribute(&self.attributes, index, kind)?;
        self.apply(next);
        Ok(())
    }

    pub fn add_option(&mut self, attribute: usize) -> Result<(), VariantError> {
        let next = edit::add_option(&self.attributes, attribute)?;
        self.apply(next);
        Ok(())
    }

    pub fn set_option(
        &mut self,
        attribute: usize,
        option: usize,
        value: impl Into<String>,
    ) -> Result<(), VariantError> {
        let next = edit::set_option(&self.attributes, attribute, option, value)?;
        self.apply(next);
        Ok(())
    }

    pub fn remove_option(&mut self, attribute: usize, option: usize) -> Result<(), VariantError> {
        let next = edit::remove_option(&self.attributes, attribute, option)?;
        self.apply(next);
        Ok(())
    }

    pub fn reset_to_default(&mut self) {
        self.apply(edit::reset_to_default());
    }

    pub fn set_price(&mut self, key: &str, price: Decimal) -> Result<(), VariantError> {
        check_price(key, price)?;
        self.combination_mut(key)?.price = price;
        Ok(())
    }

    pub fn set_stock(&mut self, key: &str, stock: u32) -> Result<(), VariantError> {
        self.combination_mut(key)?.stock = stock;
        Ok(())
    }

    pub fn set_thumbnail(
        &mut self,
        key: &str,
        thumbnail: Option<String>,
    ) -> Result<(), VariantError> {
        self.combination_mut(key)?.thumbnail = thumbnail;
        Ok(())
    }

    /// Same price and stock for every combination
    pub fn apply_to_all(&mut self, price: Decimal, stock: u32) -> Result<(), VariantError> {
        check_price("*", price)?;
        for combination in &mut self.combinations {
            combination.price = price;
            combination.stock = stock;
        }
        Ok(())
    }

    /// Submit-time check of both attributes and combinations
    pub fn validate(&self) -> Result<(), VariantError> {
        edit::validate_attributes(&self.attributes)?;
        validate_combinations(&self.combinations)
    }

    fn apply(&mut self, attributes: Vec<VariantAttribute>) {
        let fresh = generate_combinations(&attributes);
        self.combinations = reconcile(&fresh, &self.combinations);
        self.attributes = attributes;
        debug!(
            attributes = self.attributes.len(),
            combinations = self.combinations.len(),
            "variant form updated"
        );
    }

    fn combination_mut(&mut self, key: &str) -> Result<&mut VariantCombination, VariantError> {
        self.combinations
            .iter_mut()
            .find(|c| c.key == key)
            .ok_or_else(|| VariantError::UnknownKey {
                key: key.to_string(),
            })
    }
}

fn check_price(key: &str, price: Decimal) -> Result<(), VariantError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(VariantError::NegativePrice {
            key: key.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditRejection;

    fn keys(form: &VariantForm) -> Vec<&str> {
        form.combinations().iter().map(|c| c.key.as_str()).collect()
    }

    /// Color: Red, Blue
    fn color_form() -> VariantForm {
        let mut form = VariantForm::new();
        form.add_attribute();
        form.rename_attribute(0, "Color").unwrap();
        form.set_option(0, 0, "Red").unwrap();
        form.add_option(0).unwrap();
        form.set_option(0, 1, "Blue").unwrap();
        form
    }

    #[test]
    fn test_new_form_has_default_variant() {
        let form = VariantForm::new();
        assert_eq!(form.attributes(), &[VariantAttribute::default_sentinel()]);
        assert_eq!(keys(&form), vec!["default"]);
    }

    #[test]
    fn test_default_price_survives_adding_attribute() {
        let mut form = VariantForm::new();
        form.set_price("default", Decimal::new(5, 0)).unwrap();
        form.add_attribute();
        // still a sole unnamed attribute, so still the default variant
        assert_eq!(form.combination("default").unwrap().price, Decimal::new(5, 0));
    }

    #[test]
    fn test_building_attributes_regenerates() {
        let form = color_form();
        assert_eq!(keys(&form), vec!["Red", "Blue"]);
    }

    #[test]
    fn test_values_survive_adding_attribute() {
        let mut form = color_form();
        form.set_price("Red", Decimal::new(10, 0)).unwrap();
        form.set_stock("Red", 3).unwrap();

        form.add_attribute();
        form.rename_attribute(1, "Size").unwrap();
        form.set_option(1, 0, "S").unwrap();
        assert_eq!(keys(&form), vec!["Red / S", "Blue / S"]);
        // key changed, so values reset
        assert!(form.combination("Red / S").unwrap().price.is_zero());

        form.set_price("Red / S", Decimal::new(12, 0)).unwrap();
        form.add_option(1).unwrap();
        form.set_option(1, 1, "M").unwrap();
        assert_eq!(keys(&form), vec!["Red / S", "Red / M", "Blue / S", "Blue / M"]);
        assert_eq!(form.combination("Red / S").unwrap().price, Decimal::new(12, 0));
        assert!(form.combination("Red / M").unwrap().price.is_zero());
    }

    #[test]
    fn test_removing_option_prunes() {
        let mut form = color_form();
        form.set_stock("Blue", 8).unwrap();
        form.remove_option(0, 0).unwrap();
        assert_eq!(keys(&form), vec!["Blue"]);
        assert_eq!(form.combination("Blue").unwrap().stock, 8);
    }

    #[test]
    fn test_rejected_edit_changes_nothing() {
        let mut form = color_form();
        form.add_option(0).unwrap();
        let before = form.clone();
        assert_eq!(
            form.add_option(0),
            Err(VariantError::InvalidState(
                EditRejection::BlankOptionPending { attribute: 0 }
            ))
        );
        assert_eq!(
            form.remove_attribute(0),
            Err(VariantError::InvalidState(EditRejection::LastAttribute))
        );
        assert_eq!(form, before);
    }

    #[test]
    fn test_reset_to_default() {
        let mut form = color_form();
        form.reset_to_default();
        assert_eq!(keys(&form), vec!["default"]);
    }

    #[test]
    fn test_from_persisted() {
        let persisted = vec![
            VariantCombination::new("Red").with_price(Decimal::new(3, 0)),
            VariantCombination::new("Green").with_price(Decimal::new(4, 0)),
        ];
        let form = VariantForm::from_persisted(
            vec![VariantAttribute::new("Color", ["Red", "Blue"])],
            &persisted,
        );
        assert_eq!(keys(&form), vec!["Red", "Blue"]);
        assert_eq!(form.combination("Red").unwrap().price, Decimal::new(3, 0));
    }

    #[test]
    fn test_deserialize_rebuilds_combinations() {
        let form: VariantForm = serde_json::from_str(
            r#"{
                "attributes": [{"type": "Color", "options": ["Red"]}],
                "combinations": [{"key": "Blue / XL", "price": "9"}]
            }"#,
        )
        .unwrap();
        assert_eq!(keys(&form), vec!["Red"]);
        assert!(form.combination("Blue / XL").is_none());

        let form: VariantForm = serde_json::from_str(
            r#"{"attributes": [{"type": "default", "options": ["default"]}]}"#,
        )
        .unwrap();
        assert_eq!(form, VariantForm::new());
    }

    #[test]
    fn test_serde_round_trip_keeps_values() {
        let mut form = color_form();
        form.set_price("Blue", Decimal::new(1250, 2)).unwrap();
        form.set_stock("Red", 4).unwrap();

        let json = serde_json::to_string(&form).unwrap();
        let restored: VariantForm = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, form);
    }

    #[test]
    fn test_setters_check_key_and_price() {
        let mut form = color_form();
        assert_eq!(
            form.set_stock("Purple", 1),
            Err(VariantError::UnknownKey {
                key: "Purple".into()
            })
        );
        assert_eq!(
            form.set_price("Red", Decimal::new(-1, 0)),
            Err(VariantError::NegativePrice { key: "Red".into() })
        );
        form.set_thumbnail("Red", Some("red.png".into())).unwrap();
        assert_eq!(
            form.combination("Red").unwrap().thumbnail.as_deref(),
            Some("red.png")
        );
    }

    #[test]
    fn test_apply_to_all() {
        let mut form = color_form();
        form.apply_to_all(Decimal::new(899, 2), 5).unwrap();
        assert!(form
            .combinations()
            .iter()
            .all(|c| c.price == Decimal::new(899, 2) && c.stock == 5));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_validate_flags_blank_option() {
        let mut form = color_form();
        form.add_option(0).unwrap();
        assert!(matches!(
            form.validate(),
            Err(VariantError::BlankOption { .. })
        ));
    }
}
