//! Error handling for the storefront core
//!
//! One `thiserror` enum per concern, folded into [`StorefrontError`] for
//! callers that do not care which component rejected their input.

use thiserror::Error;

/// Main error type for the storefront core
#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Pagination error: {0}")]
    Pagination(#[from] PaginationError),

    #[error("Variant error: {0}")]
    Variant(#[from] VariantError),

    #[error("Quantity error: {0}")]
    Quantity(#[from] QuantityError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Malformed pagination input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Current page must be at least 1, got {current_page}")]
    InvalidCurrentPage { current_page: u32 },

    #[error("Window radius must be at least 1, got {radius}")]
    InvalidRadius { radius: u32 },

    #[error("Page size must be at least 1, got {page_size}")]
    InvalidPageSize { page_size: u32 },
}

/// Why an attribute edit was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRejection {
    /// An option of this attribute is still blank
    BlankOptionPending { attribute: usize },
    /// The list must keep at least one attribute
    LastAttribute,
}

impl std::fmt::Display for EditRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditRejection::BlankOptionPending { attribute } => write!(
                f,
                "attribute {} has a blank option; fill it before adding another",
                attribute
            ),
            EditRejection::LastAttribute => write!(f, "cannot remove the last attribute"),
        }
    }
}

/// Variant attribute and combination errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantError {
    #[error("Invalid state: {0}")]
    InvalidState(EditRejection),

    #[error("Attribute index {index} out of range (have {len})")]
    AttributeOutOfRange { index: usize, len: usize },

    #[error("Option index {index} out of range for attribute {attribute} (have {len})")]
    OptionOutOfRange {
        attribute: usize,
        index: usize,
        len: usize,
    },

    #[error("Attribute '{attribute}' lists option '{option}' more than once")]
    DuplicateOption { attribute: String, option: String },

    #[error("Attribute '{attribute}' has a blank option")]
    BlankOption { attribute: String },

    #[error("Option '{option}' of attribute '{attribute}' contains the key separator")]
    SeparatorInOption { attribute: String, option: String },

    #[error("The 'default' attribute must be the only attribute (found {count})")]
    SentinelNotSole { count: usize },

    #[error("Combination '{key}' has a negative price")]
    NegativePrice { key: String },

    #[error("Combination key '{key}' appears more than once")]
    DuplicateKey { key: String },

    #[error("No combination with key '{key}'")]
    UnknownKey { key: String },
}

/// Cart quantity input errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("'{input}' is not a number")]
    NotANumber { input: String },

    #[error("Item is out of stock")]
    OutOfStock,
}

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    Parse(String),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, StorefrontError>;
