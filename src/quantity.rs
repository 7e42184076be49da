//! Cart quantity input
//!
//! Clamps the quantity a shopper types or steps through into what can be
//! ordered: at least `min`, at most the smaller of stock and the per-line cap.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::QuantityConfig;
use crate::error::QuantityError;

/// Inclusive range a cart line quantity is kept in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityBounds {
    pub min: u32,
    pub max: u32,
}

impl QuantityBounds {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Bounds for an item with `stock` units left
    pub fn for_stock(stock: u32, config: &QuantityConfig) -> Self {
        Self::new(config.min, stock.min(config.max_per_line))
    }

    /// False when nothing can be put in the cart
    pub fn is_orderable(&self) -> bool {
        self.max >= self.min.max(1)
    }

    /// Nearest allowed quantity; 0 when the item cannot be ordered
    pub fn clamp(&self, quantity: u32) -> u32 {
        if !self.is_orderable() {
            return 0;
        }
        quantity.clamp(self.min, self.max)
    }

    pub fn increment(&self, quantity: u32) -> u32 {
        self.clamp(quantity.saturating_add(1))
    }

    pub fn decrement(&self, quantity: u32) -> u32 {
        self.clamp(quantity.saturating_sub(1))
    }

    pub fn can_increment(&self, quantity: u32) -> bool {
        self.is_orderable() && quantity < self.max
    }

    pub fn can_decrement(&self, quantity: u32) -> bool {
        self.is_orderable() && quantity > self.min
    }

    /// Parse typed text into an allowed quantity.
    ///
    /// Cleared input falls back to `min`, negative numbers clamp up to `min`,
    /// numbers too large for a `u32` clamp down to `max`.
    pub fn parse_input(&self, input: &str) -> Result<u32, QuantityError> {
        if !self.is_orderable() {
            return Err(QuantityError::OutOfStock);
        }

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(self.min.max(1).min(self.max));
        }

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            debug!(input, "rejecting non-numeric quantity");
            return Err(QuantityError::NotANumber {
                input: input.to_string(),
            });
        }
        if negative {
            return Ok(self.clamp(0));
        }

        // all digits, so a parse failure can only be overflow
        let quantity = digits.parse::<u32>().unwrap_or(u32::MAX);
        Ok(self.clamp(quantity))
    }
}

/// Quantity stepper state for one cart line or product page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityInput {
    value: u32,
    bounds: QuantityBounds,
}

impl QuantityInput {
    pub fn new(bounds: QuantityBounds) -> Self {
        Self {
            value: bounds.clamp(bounds.min),
            bounds,
        }
    }

    pub fn for_stock(stock: u32, config: &QuantityConfig) -> Self {
        Self::new(QuantityBounds::for_stock(stock, config))
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn bounds(&self) -> QuantityBounds {
        self.bounds
    }

    pub fn increment(&mut self) -> u32 {
        self.value = self.bounds.increment(self.value);
        self.value
    }

    pub fn decrement(&mut self) -> u32 {
        self.value = self.bounds.decrement(self.value);
        self.value
    }

    /// Apply typed text; on error the previous value is kept
    pub fn set_text(&mut self, input: &str) -> Result<u32, QuantityError> {
        self.value = self.bounds.parse_input(input)?;
        Ok(self.value)
    }

    /// Stock changed underneath the input (e.g. after a cart refresh)
    pub fn set_bounds(&mut self, bounds: QuantityBounds) {
        self.bounds = bounds;
        self.value = bounds.clamp(self.value);
    }
}
