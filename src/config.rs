//! Storefront Configuration
//!
//! Tunables for the listing pages and the cart. Loaded from YAML, then
//! overridden from the environment (a `.env` file is honoured).
//!
//! ```yaml
//! pagination:
//!   radius: 2
//!   page_size: 20
//! quantity:
//!   min: 1
//!   max_per_line: 99
//! ```

use std::env;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

pub const ENV_PAGE_RADIUS: &str = "STOREFRONT_PAGE_RADIUS";
pub const ENV_PAGE_SIZE: &str = "STOREFRONT_PAGE_SIZE";
pub const ENV_QTY_MIN: &str = "STOREFRONT_QTY_MIN";
pub const ENV_QTY_MAX_PER_LINE: &str = "STOREFRONT_QTY_MAX_PER_LINE";

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub quantity: QuantityConfig,
}

/// Listing page settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Neighbours shown either side of the current page
    #[serde(default = "default_radius")]
    pub radius: u32,
    /// Items per listing page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            page_size: default_page_size(),
        }
    }
}

/// Cart line quantity settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityConfig {
    #[serde(default = "default_min_quantity")]
    pub min: u32,
    /// Upper cap per cart line, applied on top of stock
    #[serde(default = "default_max_per_line")]
    pub max_per_line: u32,
}

impl Default for QuantityConfig {
    fn default() -> Self {
        Self {
            min: default_min_quantity(),
            max_per_line: default_max_per_line(),
        }
    }
}

fn default_radius() -> u32 {
    2
}

fn default_page_size() -> u32 {
    20
}

fn default_min_quantity() -> u32 {
    1
}

fn default_max_per_line() -> u32 {
    99
}

impl StorefrontConfig {
    /// Load from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = Self::load_from_str(&content)?;
        info!("Loaded storefront config from {:?}", path);
        Ok(config)
    }

    /// Load from a YAML string
    pub fn load_from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply `STOREFRONT_*` environment overrides on top of this config
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Load .env file if present
        if dotenvy::dotenv().is_ok() {
            debug!("Read .env file");
        }

        if let Some(radius) = env_override(ENV_PAGE_RADIUS)? {
            self.pagination.radius = radius;
        }
        if let Some(page_size) = env_override(ENV_PAGE_SIZE)? {
            self.pagination.page_size = page_size;
        }
        if let Some(min) = env_override(ENV_QTY_MIN)? {
            self.quantity.min = min;
        }
        if let Some(max_per_line) = env_override(ENV_QTY_MAX_PER_LINE)? {
            self.quantity.max_per_line = max_per_line;
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject settings the components cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.radius == 0 {
            return Err(invalid("pagination.radius", "must be at least 1"));
        }
        if self.pagination.page_size == 0 {
            return Err(invalid("pagination.page_size", "must be at least 1"));
        }
        if self.quantity.min > self.quantity.max_per_line {
            return Err(invalid(
                "quantity.min",
                &format!(
                    "{} exceeds quantity.max_per_line {}",
                    self.quantity.min, self.quantity.max_per_line
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn env_override<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|e: T::Err| {
            warn!("Invalid {} value '{}': {}", key, raw, e);
            invalid(key, &e.to_string())
        }),
        Err(_) => Ok(None),
    }
}
