//! Variant attributes and the edits the product form applies to them
//!
//! Every edit takes the current list and hands back a new one. A refused
//! edit returns an error and leaves the caller's list as it was.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EditRejection, VariantError};

use super::combination::KEY_SEPARATOR;

/// Type and option value of the "no configurable variants" sentinel
pub const DEFAULT_VARIANT: &str = "default";

/// A configurable product attribute such as Color or Size
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantAttribute {
    /// Attribute name; empty while the admin has not typed one yet
    #[serde(rename = "type")]
    pub kind: String,
    /// Option values in display order
    #[serde(default)]
    pub options: Vec<String>,
}

impl VariantAttribute {
    pub fn new<I, S>(kind: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Freshly added attribute: no name, one empty option slot
    pub fn blank() -> Self {
        Self::new("", [""])
    }

    pub fn default_sentinel() -> Self {
        Self::new(DEFAULT_VARIANT, [DEFAULT_VARIANT])
    }

    pub fn is_default_sentinel(&self) -> bool {
        self.kind == DEFAULT_VARIANT
    }

    /// Attribute whose name has not been filled in
    pub fn is_placeholder(&self) -> bool {
        self.kind.is_empty()
    }

    pub fn has_blank_option(&self) -> bool {
        self.options.iter().any(|o| o.trim().is_empty())
    }

    /// Options with repeats removed, first occurrence wins
    pub(crate) fn distinct_options(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let distinct: Vec<&str> = self
            .options
            .iter()
            .map(String::as_str)
            .filter(|o| seen.insert(*o))
            .collect();

        if distinct.len() != self.options.len() {
            warn!(
                attribute = %self.kind,
                dropped = self.options.len() - distinct.len(),
                "ignoring repeated option values"
            );
        }
        distinct
    }
}

/// Append a blank attribute, replacing the `default` sentinel if present
pub fn add_attribute(attributes: &[VariantAttribute]) -> Vec<VariantAttribute> {
    let mut next: Vec<VariantAttribute> = attributes
        .iter()
        .filter(|a| !a.is_default_sentinel())
        .cloned()
        .collect();
    next.push(VariantAttribute::blank());
    next
}

/// Remove the attribute at `index`; the last remaining attribute is kept
pub fn remove_attribute(
    attributes: &[VariantAttribute],
    index: usize,
) -> Result<Vec<VariantAttribute>, VariantError> {
    check_attribute(attributes, index)?;
    if attributes.len() == 1 {
        debug!("refusing to remove the only attribute");
        return Err(VariantError::InvalidState(EditRejection::LastAttribute));
    }

    let mut next = attributes.to_vec();
    next.remove(index);
    Ok(next)
}

/// Append an empty option slot once every existing option is filled in
pub fn add_option(
    attributes: &[VariantAttribute],
    attribute: usize,
) -> Result<Vec<VariantAttribute>, VariantError> {
    check_attribute(attributes, attribute)?;
    if attributes[attribute].has_blank_option() {
        debug!(attribute, "blank option pending, not adding another");
        return Err(VariantError::InvalidState(
            EditRejection::BlankOptionPending { attribute },
        ));
    }

    let mut next = attributes.to_vec();
    next[attribute].options.push(String::new());
    Ok(next)
}

/// Remove one option; an attribute may be left with none mid-edit
pub fn remove_option(
    attributes: &[VariantAttribute],
    attribute: usize,
    option: usize,
) -> Result<Vec<VariantAttribute>, VariantError> {
    check_option(attributes, attribute, option)?;

    let mut next = attributes.to_vec();
    next[attribute].options.remove(option);
    Ok(next)
}

pub fn rename_attribute(
    attributes: &[VariantAttribute],
    attribute: usize,
    kind: impl Into<String>,
) -> Result<Vec<VariantAttribute>, VariantError> {
    check_attribute(attributes, attribute)?;

    let mut next = attributes.to_vec();
    next[attribute].kind = kind.into();
    Ok(next)
}

pub fn set_option(
    attributes: &[VariantAttribute],
    attribute: usize,
    option: usize,
    value: impl Into<String>,
) -> Result<Vec<VariantAttribute>, VariantError> {
    check_option(attributes, attribute, option)?;

    let mut next = attributes.to_vec();
    next[attribute].options[option] = value.into();
    Ok(next)
}

/// The single sentinel attribute
pub fn reset_to_default() -> Vec<VariantAttribute> {
    vec![VariantAttribute::default_sentinel()]
}

/// Check an attribute list before it is submitted.
///
/// Stricter than generation: repeated options, blank options and option
/// values containing the key separator are errors here.
pub fn validate_attributes(attributes: &[VariantAttribute]) -> Result<(), VariantError> {
    if attributes.len() > 1 && attributes.iter().any(VariantAttribute::is_default_sentinel) {
        return Err(VariantError::SentinelNotSole {
            count: attributes.len(),
        });
    }

    for attribute in attributes {
        let mut seen = HashSet::new();
        for option in &attribute.options {
            if option.trim().is_empty() {
                return Err(VariantError::BlankOption {
                    attribute: attribute.kind.clone(),
                });
            }
            if option.contains(KEY_SEPARATOR) {
                return Err(VariantError::SeparatorInOption {
                    attribute: attribute.kind.clone(),
                    option: option.clone(),
                });
            }
            if !seen.insert(option.as_str()) {
                return Err(VariantError::DuplicateOption {
                    attribute: attribute.kind.clone(),
                    option: option.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_attribute(attributes: &[VariantAttribute], index: usize) -> Result<(), VariantError> {
    if index >= attributes.len() {
        return Err(VariantError::AttributeOutOfRange {
            index,
            len: attributes.len(),
        });
    }
    Ok(())
}

fn check_option(
    attributes: &[VariantAttribute],
    attribute: usize,
    option: usize,
) -> Result<(), VariantError> {
    check_attribute(attributes, attribute)?;
    let len = attributes[attribute].options.len();
    if option >= len {
        return Err(VariantError::OptionOutOfRange {
            attribute,
            index: option,
            len,
        });
    }
    Ok(())
}
