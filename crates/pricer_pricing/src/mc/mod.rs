//! Monte Carlo pricing of European calls and puts under GBM.
//!
//! # Architecture
//!
//! ```text
//! PricingEngine
//! ├── OptionParameters   (validated inputs, optional stored seed)
//! ├── GbmTerminal        (hoisted drift / diffusion)
//! ├── EngineConfig       (variant, chunk size, summation)
//! └── price_with_seed()
//!     ├── Reference  -> one PricerRng, scalar loop
//!     └── Optimized  -> rayon over chunks, PricerRng::for_stream per chunk
//!                       partial PayoffAccumulators merged in chunk order
//! ```
//!
//! Both variants compute
//!
//! ```text
//! call = exp(-rT) · (1/N) · Σ max(S_T,i - K, 0)
//! put  = exp(-rT) · (1/N) · Σ max(K - S_T,i, 0)
//! ```
//!
//! with the call and put of a path sharing the same `S_T,i`.
//!
//! # Reproducibility
//!
//! - Reference: fully determined by `(seed, num_paths)`.
//! - Optimized: fully determined by `(seed, num_paths, chunk_size)`,
//!   independent of the rayon thread count. It does not reproduce the
//!   reference draws, only the same estimator in distribution.

pub mod accumulator;
pub mod config;
pub mod engine;
pub mod result;

pub use accumulator::PayoffAccumulator;
pub use config::{
    EngineConfig, EngineConfigBuilder, EngineConfigFile, Execution, Summation,
    DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE,
};
pub use engine::PricingEngine;
pub use result::SimulationResult;
