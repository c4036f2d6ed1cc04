//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `AURALOS_CATALOG_PATH` - JSON catalog file (default: bundled catalog)
//! - `AURALOS_DATA_DIR` - Directory holding the persisted cart (default: .auralos)
//! - `AURALOS_FREE_SHIPPING_THRESHOLD` - Subtotal for free shipping (default: 99)
//! - `AURALOS_FLAT_SHIPPING_FEE` - Shipping fee below the threshold (default: 10)
//! - `AURALOS_BOGO_DISCOUNT_RATE` - Discount on every second unit, 0 to 1 (default: 0.4)
//! - `AURALOS_COLOR_TOKENS` - Comma-separated color vocabulary (default: built-in list)
//! - `AURALOS_FALLBACK_COUNT` - Products shown when no finder candidate matches (default: 3)

use std::path::PathBuf;

use auralos_core::{ColorVocabulary, PricingPolicy};
use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Catalog file to load instead of the bundled one
    pub catalog_path: Option<PathBuf>,
    /// Directory for the file-backed cart store
    pub data_dir: PathBuf,
    pub pricing: PricingPolicy,
    pub colors: ColorVocabulary,
    pub fallback_count: usize,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let discount_rate = env.parse_or("AURALOS_BOGO_DISCOUNT_RATE", "0.4")?;
        if discount_rate < Decimal::ZERO || discount_rate > Decimal::ONE {
            return Err(ConfigError::InvalidEnvVar(
                "AURALOS_BOGO_DISCOUNT_RATE".to_string(),
                format!("must be between 0 and 1 (got {discount_rate})"),
            ));
        }
        let pricing = PricingPolicy {
            discount_rate,
            free_shipping_threshold: env.parse_non_negative("AURALOS_FREE_SHIPPING_THRESHOLD", "99")?,
            flat_shipping_fee: env.parse_non_negative("AURALOS_FLAT_SHIPPING_FEE", "10")?,
        };

        let colors = match env.optional("AURALOS_COLOR_TOKENS") {
            Some(list) => {
                let colors = ColorVocabulary::from_tokens(list.split(','));
                if colors.is_empty() {
                    return Err(ConfigError::InvalidEnvVar(
                        "AURALOS_COLOR_TOKENS".to_string(),
                        "no color tokens given".to_string(),
                    ));
                }
                colors
            }
            None => ColorVocabulary::default(),
        };

        Ok(Self {
            catalog_path: env.optional("AURALOS_CATALOG_PATH").map(PathBuf::from),
            data_dir: PathBuf::from(env.or_default("AURALOS_DATA_DIR", ".auralos")),
            pricing,
            colors,
            fallback_count: env.parse_or("AURALOS_FALLBACK_COUNT", "3")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable. Blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    fn parse_non_negative(&self, key: &str, default: &str) -> Result<Decimal, ConfigError> {
        let value: Decimal = self.parse_or(key, default)?;
        if value.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("must not be negative (got {value})"),
            ));
        }
        Ok(value)
    }
}
