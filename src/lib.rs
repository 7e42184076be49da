//! Storefront Core - catalog logic behind the storefront client
//!
//! The storefront (catalog browsing, cart, checkout, admin console) is mostly
//! HTTP calls and rendering. What is left once those are stripped away lives
//! here as plain functions over plain data:
//!
//! - [`pagination`]: which page numbers a listing shows and where the
//!   ellipses go
//! - [`variants`]: product variant combinations generated from attribute
//!   options and reconciled with saved variants
//! - [`quantity`]: clamping the cart quantity input
//!
//! ## Quick Start
//!
//! ```rust
//! use storefront_core::pagination::{compute_window, render_window};
//! use storefront_core::variants::{generate_combinations, VariantAttribute};
//!
//! let slots = compute_window(10, 20, 2).unwrap();
//! assert_eq!(render_window(&slots), "1 2 … 8 9 [10] 11 12 … 19 20");
//!
//! let combinations = generate_combinations(&[
//!     VariantAttribute::new("Color", ["Red", "Blue"]),
//!     VariantAttribute::new("Size", ["S", "M"]),
//! ]);
//! assert_eq!(combinations[1].key, "Red / M");
//! ```

// Core error handling
pub mod error;

// Settings loaded from YAML and the environment
pub mod config;

// Subscriber setup for binaries
pub mod telemetry;

pub mod pagination;
pub mod quantity;
pub mod variants;

pub use config::StorefrontConfig;
pub use error::{
    ConfigError, EditRejection, PaginationError, QuantityError, Result, StorefrontError,
    VariantError,
};
pub use pagination::{compute_window, PageRequest, PageSlot, Pagination};
pub use quantity::{QuantityBounds, QuantityInput};
pub use variants::{
    generate_combinations, reconcile, VariantAttribute, VariantCombination, VariantForm,
};
