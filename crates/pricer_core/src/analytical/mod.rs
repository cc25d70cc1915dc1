//! Analytical pricing formulas.
//!
//! - [`black_scholes`]: closed-form European call/put prices used as the
//!   convergence target for the Monte Carlo engine

pub mod black_scholes;

pub use black_scholes::{black_scholes_call, black_scholes_prices, black_scholes_put};
