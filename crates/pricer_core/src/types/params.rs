//! Market and contract parameters for a single-asset European option.
//!
//! [`OptionParameters`] is validated once at construction and never mutated
//! afterwards: fields are private and only exposed through getters.

use super::error::PricingError;

/// Immutable parameters of a European option pricing scenario.
///
/// # Invariants
///
/// - `initial_price`, `strike_price`, `volatility`, `time_to_expiry` are finite and `>= 0`
/// - `risk_free_rate` is finite (either sign)
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{OptionParameters, PricingError};
///
/// let params = OptionParameters::new(100.0, 100.0, 0.05, 0.2, 1.0, None).unwrap();
/// assert_eq!(params.strike_price(), 100.0);
///
/// let err = OptionParameters::new(100.0, 100.0, 0.05, -0.1, 1.0, None).unwrap_err();
/// assert!(matches!(err, PricingError::InvalidParameter { name: "volatility", .. }));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawParameters"))]
pub struct OptionParameters {
    /// Spot price at valuation (S₀).
    initial_price: f64,
    /// Strike price (K).
    strike_price: f64,
    /// Continuously compounded risk-free rate (r).
    risk_free_rate: f64,
    /// Annualised volatility (σ).
    volatility: f64,
    /// Time to expiry in years (T).
    time_to_expiry: f64,
    /// Seed used by pricing calls that do not supply their own.
    seed: Option<u64>,
}

impl OptionParameters {
    /// Validates and builds a parameter set.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` naming the first offending field if
    /// `volatility`, `initial_price`, `strike_price` or `time_to_expiry` is negative,
    /// or if any value (including `risk_free_rate`) is NaN or infinite.
    pub fn new(
        initial_price: f64,
        strike_price: f64,
        risk_free_rate: f64,
        volatility: f64,
        time_to_expiry: f64,
        seed: Option<u64>,
    ) -> Result<Self, PricingError> {
        check_non_negative("volatility", volatility)?;
        check_non_negative("initial_price", initial_price)?;
        check_non_negative("strike_price", strike_price)?;
        check_non_negative("time_to_expiry", time_to_expiry)?;
        if !risk_free_rate.is_finite() {
            return Err(PricingError::InvalidParameter {
                name: "risk_free_rate",
                value: risk_free_rate,
            });
        }

        Ok(Self {
            initial_price,
            strike_price,
            risk_free_rate,
            volatility,
            time_to_expiry,
            seed,
        })
    }

    /// Returns the spot price (S₀).
    #[inline]
    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Returns the strike price (K).
    #[inline]
    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    /// Returns the risk-free rate (r).
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Returns the volatility (σ).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the time to expiry in years (T).
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Returns the stored seed, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Discount factor `exp(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }

    /// Deterministic forward price `S₀·exp(rT)`.
    #[inline]
    pub fn forward_price(&self) -> f64 {
        self.initial_price * (self.risk_free_rate * self.time_to_expiry).exp()
    }
}

// Rejects negatives, NaN and infinities.
fn check_non_negative(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidParameter { name, value })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawParameters {
    initial_price: f64,
    strike_price: f64,
    risk_free_rate: f64,
    volatility: f64,
    time_to_expiry: f64,
    #[serde(default)]
    seed: Option<u64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawParameters> for OptionParameters {
    type Error = PricingError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        Self::new(
            raw.initial_price,
            raw.strike_price,
            raw.risk_free_rate,
            raw.volatility,
            raw.time_to_expiry,
            raw.seed,
        )
    }
}
