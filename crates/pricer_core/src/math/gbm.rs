//! Closed-form GBM terminal value and vanilla payoffs.
//!
//! Under risk-neutral Geometric Brownian Motion the terminal asset price has
//! the exact solution
//!
//! ```text
//! S_T(z) = S₀ · exp((r - ½σ²)·T + σ·√T·z),   z ~ N(0, 1)
//! ```
//!
//! One standard-normal draw per path is therefore exact in distribution; no
//! time discretisation is involved.
//!
//! [`GbmTerminal`] hoists the drift and diffusion terms out of the per-path
//! loop so that each evaluation costs one multiply-add and one `exp`.

use num_traits::Float;

use crate::types::OptionParameters;

/// Precomputed GBM terminal-price kernel.
///
/// # Examples
///
/// ```rust
/// use pricer_core::math::gbm::GbmTerminal;
///
/// let kernel = GbmTerminal::new(100.0_f64, 0.05, 0.2, 1.0);
/// let s_t = kernel.terminal_price(0.0);
/// // exp((0.05 - 0.02) * 1.0) * 100
/// assert!((s_t - 100.0 * 0.03_f64.exp()).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmTerminal<T: Float> {
    /// Initial spot price (S₀).
    spot: T,
    /// (r - ½σ²)·T
    drift: T,
    /// σ·√T
    diffusion: T,
}

impl<T: Float> GbmTerminal<T> {
    /// Builds the kernel from raw model inputs.
    ///
    /// # Arguments
    ///
    /// * `spot` - Initial spot price
    /// * `rate` - Risk-free rate (annualised)
    /// * `volatility` - Volatility (annualised)
    /// * `expiry` - Time to expiry (years)
    #[inline]
    pub fn new(spot: T, rate: T, volatility: T, expiry: T) -> Self {
        let half = T::one() / (T::one() + T::one());
        Self {
            spot,
            drift: (rate - half * volatility * volatility) * expiry,
            diffusion: volatility * expiry.sqrt(),
        }
    }

    /// Returns the hoisted drift term `(r - ½σ²)·T`.
    #[inline]
    pub fn drift(&self) -> T {
        self.drift
    }

    /// Returns the hoisted diffusion term `σ·√T`.
    #[inline]
    pub fn diffusion(&self) -> T {
        self.diffusion
    }

    /// Evaluates `S_T` for a standard-normal shock `z`.
    #[inline]
    pub fn terminal_price(&self, z: T) -> T {
        self.spot * (self.drift + self.diffusion * z).exp()
    }
}

impl GbmTerminal<f64> {
    /// Builds the kernel from validated option parameters.
    #[inline]
    pub fn from_parameters(params: &OptionParameters) -> Self {
        Self::new(
            params.initial_price(),
            params.risk_free_rate(),
            params.volatility(),
            params.time_to_expiry(),
        )
    }

    /// Builds the kernel of the discounted terminal price `exp(-rT)·S_T`.
    ///
    /// The rate cancels out of the exponent, leaving
    /// `S0·exp(-½σ²T + σ√T·z)`, which stays finite when `r·T` alone would
    /// overflow `exp`. Compare against the discounted strike `K·exp(-rT)`.
    #[inline]
    pub fn discounted(params: &OptionParameters) -> Self {
        Self::new(
            params.initial_price(),
            0.0,
            params.volatility(),
            params.time_to_expiry(),
        )
    }
}

/// Call payoff `max(S_T - K, 0)`.
#[inline]
pub fn call_payoff<T: Float>(terminal: T, strike: T) -> T {
    (terminal - strike).max(T::zero())
}

/// Put payoff `max(K - S_T, 0)`.
#[inline]
pub fn put_payoff<T: Float>(terminal: T, strike: T) -> T {
    (strike - terminal).max(T::zero())
}
