//! Numerical kernels.
//!
//! - [`gbm`]: closed-form GBM terminal price and vanilla payoffs
//! - [`distributions`]: standard normal CDF

pub mod distributions;
pub mod gbm;

pub use gbm::{call_payoff, put_payoff, GbmTerminal};
