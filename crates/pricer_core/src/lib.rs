//! # pricer_core: Foundation for the Monte Carlo European Option Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Validated, immutable option parameters (`types::params`)
//! - Error taxonomy shared by every layer (`types::error`)
//! - The closed-form GBM terminal-price kernel and vanilla payoffs (`math::gbm`)
//! - Standard normal distribution functions (`math::distributions`)
//! - Black-Scholes closed form used as a verification reference (`analytical`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::OptionParameters;
//! use pricer_core::math::gbm::GbmTerminal;
//! use pricer_core::analytical::black_scholes_prices;
//!
//! let params = OptionParameters::new(100.0, 100.0, 0.05, 0.2, 1.0, Some(42)).unwrap();
//!
//! // Terminal price for a zero shock is the drift-adjusted forward
//! let kernel = GbmTerminal::from_parameters(&params);
//! let s_t = kernel.terminal_price(0.0);
//! assert!(s_t > 0.0);
//!
//! let (call, put) = black_scholes_prices(&params);
//! assert!((call - 10.4506).abs() < 1e-3);
//! assert!((put - 5.5735).abs() < 1e-3);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `OptionParameters`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod math;
pub mod types;

pub use types::{OptionParameters, PricingError};
