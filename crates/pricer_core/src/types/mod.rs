//! Core parameter and error types.
//!
//! This module provides:
//! - `params`: Validated, immutable market/option parameters for a pricing scenario
//! - `error`: Structured error taxonomy shared by the engine and service layers
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`OptionParameters`] from `params`
//! - [`PricingError`] from `error`

pub mod error;
pub mod params;

pub use error::PricingError;
pub use params::OptionParameters;
