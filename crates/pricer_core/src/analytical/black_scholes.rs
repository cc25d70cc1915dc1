//! Black-Scholes closed form for European options.
//!
//! Serves as the reference value that Monte Carlo estimates converge to.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! When `σ√T = 0`, `S = 0` or `K = 0` the terminal price is deterministic
//! (or the option degenerates), and the price is the discounted intrinsic
//! value of the forward.

use crate::math::distributions::norm_cdf;
use crate::types::OptionParameters;

/// Black-Scholes call and put prices for the given parameters.
///
/// # Examples
/// ```
/// use pricer_core::analytical::black_scholes_prices;
/// use pricer_core::types::OptionParameters;
///
/// let params = OptionParameters::new(100.0, 100.0, 0.05, 0.2, 1.0, None).unwrap();
/// let (call, put) = black_scholes_prices(&params);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-6);
/// ```
pub fn black_scholes_prices(params: &OptionParameters) -> (f64, f64) {
    (black_scholes_call(params), black_scholes_put(params))
}

/// Black-Scholes European call price.
pub fn black_scholes_call(params: &OptionParameters) -> f64 {
    let spot = params.initial_price();
    let strike = params.strike_price();
    let discount = params.discount_factor();

    match d_terms(params) {
        Some((d1, d2)) => spot * norm_cdf(d1) - strike * discount * norm_cdf(d2),
        None => discount * (params.forward_price() - strike).max(0.0),
    }
}

/// Black-Scholes European put price.
pub fn black_scholes_put(params: &OptionParameters) -> f64 {
    let spot = params.initial_price();
    let strike = params.strike_price();
    let discount = params.discount_factor();

    match d_terms(params) {
        Some((d1, d2)) => strike * discount * norm_cdf(-d2) - spot * norm_cdf(-d1),
        None => discount * (strike - params.forward_price()).max(0.0),
    }
}

// None for the degenerate cases handled by the intrinsic-value branch.
fn d_terms(params: &OptionParameters) -> Option<(f64, f64)> {
    let spot = params.initial_price();
    let strike = params.strike_price();
    let expiry = params.time_to_expiry();
    let vol_sqrt_t = params.volatility() * expiry.sqrt();

    if vol_sqrt_t <= 0.0 || spot <= 0.0 || strike <= 0.0 {
        return None;
    }

    let rate = params.risk_free_rate();
    let vol = params.volatility();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * expiry) / vol_sqrt_t;
    Some((d1, d1 - vol_sqrt_t))
}
