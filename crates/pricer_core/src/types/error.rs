//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from parameter validation, engine configuration and pricing calls
//!
//! All validation happens eagerly: parameters are checked at construction,
//! path counts at call entry, before any sampling begins.

use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `InvalidParameter`: A market/option parameter violates its bound at construction
/// - `InvalidArgument`: A pricing call received an unusable argument (e.g. zero paths)
/// - `InvalidConfig`: Engine configuration failed validation or could not be parsed
/// - `EntropySource`: The OS entropy source failed while seeding an unseeded call
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidParameter { name: "volatility", value: -0.1 };
/// assert_eq!(format!("{}", err), "Invalid parameter 'volatility': -0.1");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    /// A constructor parameter is negative or not finite.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A call argument is outside its domain.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Argument name
        name: &'static str,
        /// Why the argument was rejected
        reason: String,
    },

    /// Engine configuration is invalid.
    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfig {
        /// Configuration key
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Fresh entropy could not be obtained for an unseeded call.
    #[error("Entropy source failure: {0}")]
    EntropySource(String),
}

impl PricingError {
    /// Returns `true` for errors raised while validating inputs.
    #[inline]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::InvalidArgument { .. } | Self::InvalidConfig { .. }
        )
    }
}
