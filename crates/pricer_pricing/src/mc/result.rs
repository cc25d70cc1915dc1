//! Pricing call output.

use serde::{Deserialize, Serialize};

/// Discounted Monte Carlo estimates of one `price` call.
///
/// `call_price` and `put_price` are the estimator itself; the remaining
/// fields describe the experiment that produced them.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationResult;
///
/// let result = SimulationResult {
///     call_price: 10.45,
///     put_price: 5.57,
///     call_std_error: 0.015,
///     put_std_error: 0.009,
///     num_paths: 1_000_000,
///     seed: 48,
/// };
///
/// let (call, put) = result.prices();
/// println!("call {:.4} +/- {:.4}", call, result.call_confidence_95());
/// # assert_eq!(put, 5.57);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Discounted mean call payoff.
    pub call_price: f64,
    /// Discounted mean put payoff.
    pub put_price: f64,
    /// Standard error of `call_price`.
    pub call_std_error: f64,
    /// Standard error of `put_price`.
    pub put_std_error: f64,
    /// Number of simulated paths.
    pub num_paths: u64,
    /// Seed of the generator (master seed for the optimized variant).
    pub seed: u64,
}

impl SimulationResult {
    /// Returns `(call_price, put_price)`.
    #[inline]
    pub fn prices(&self) -> (f64, f64) {
        (self.call_price, self.put_price)
    }

    /// 95% confidence interval half-width of the call estimate.
    #[inline]
    pub fn call_confidence_95(&self) -> f64 {
        1.96 * self.call_std_error
    }

    /// 95% confidence interval half-width of the put estimate.
    #[inline]
    pub fn put_confidence_95(&self) -> f64 {
        1.96 * self.put_std_error
    }

    /// `call_price - put_price`, the Monte Carlo side of put-call parity.
    #[inline]
    pub fn parity_spread(&self) -> f64 {
        self.call_price - self.put_price
    }
}

impl From<SimulationResult> for (f64, f64) {
    fn from(result: SimulationResult) -> Self {
        result.prices()
    }
}
