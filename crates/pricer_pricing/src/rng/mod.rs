//! # Random Number Generation Infrastructure
//!
//! Random number generation for the Monte Carlo engine.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: All generators are seeded; the seed is recorded on every result
//! - **Ownership**: Each pricing call (or chunk) owns its generator; there is no process-wide state
//! - **Efficiency**: Zero-allocation batch operations via `&mut [f64]` slices
//! - **Stream splitting**: Parallel chunks draw from streams derived from one master seed
//!
//! ## Module Structure
//!
//! - `prng`: Pseudo-random number generator wrapper, OS seeding and stream derivation
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! // Create a seeded RNG for reproducible simulations
//! let mut rng = PricerRng::from_seed(12345);
//!
//! // Generate standard normal variates (mean=0, std=1)
//! let normal_value = rng.gen_normal();
//!
//! // Independent stream 7 of the same master seed
//! let mut worker = PricerRng::for_stream(12345, 7);
//! let mut buffer = vec![0.0; 1000];
//! worker.fill_normal(&mut buffer);
//! ```

mod prng;

// Public re-exports
pub use prng::{derive_stream_seed, fresh_seed, PricerRng};
