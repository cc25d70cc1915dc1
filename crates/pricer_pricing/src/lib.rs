//! # Pricer Pricing (Layer 3: Monte Carlo Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing is the simulation layer of the workspace:
//! - Seeded, per-call random number generation ([`rng`])
//! - European call/put Monte Carlo engine under GBM ([`mc`])
//! - A scalar reference variant and a chunked rayon variant
//!
//! Model inputs, validation, payoffs and the Black-Scholes reference come
//! from Layer 1 (`pricer_core`).
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::mc::{EngineConfig, Execution, PricingEngine};
//!
//! let engine = PricingEngine::new(100.0, 100.0, 0.05, 0.2, 1.0, Some(48))
//!     .unwrap()
//!     .with_config(EngineConfig::with_execution(Execution::Optimized));
//!
//! let result = engine.price(200_000).unwrap();
//! assert!((result.call_price - 10.45).abs() < 0.25);
//! assert!((result.put_price - 5.57).abs() < 0.25);
//! ```
//!
//! ## Concurrency
//!
//! [`PricingEngine`] is `Send + Sync` and holds no random state; concurrent
//! `price` calls on one engine never share a generator. The optimized
//! variant runs on the global rayon pool, or on whichever pool the caller
//! `install`s it into.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
// Allow unknown lints for clippy compatibility across versions
#![allow(unknown_lints)]

// Random number generation infrastructure
pub mod rng;

// Monte Carlo engine
pub mod mc;

// Re-export commonly used items for convenience
pub use mc::{EngineConfig, Execution, PricingEngine, SimulationResult, Summation};
pub use pricer_core::types::{OptionParameters, PricingError};
