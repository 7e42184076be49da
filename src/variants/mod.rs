//! Product variants
//!
//! - [`attribute`]: the attribute list and the edits applied to it
//! - [`combination`]: Cartesian-product generation and reconciliation with
//!   persisted variants
//! - [`form`]: caller-side state tying the two together

pub mod attribute;
pub mod combination;
pub mod form;

pub use attribute::{
    add_attribute, add_option, remove_attribute, remove_option, rename_attribute,
    reset_to_default, set_option, validate_attributes, VariantAttribute, DEFAULT_VARIANT,
};
pub use combination::{
    generate_combinations, reconcile, validate_combinations, VariantCombination, KEY_SEPARATOR,
};
pub use form::VariantForm;
