//! Monte Carlo pricing engine.
//!
//! [`PricingEngine`] owns validated option parameters, the hoisted GBM
//! kernel and an [`EngineConfig`]. Each call to
//! [`price_with_seed`](PricingEngine::price_with_seed) is a self-contained
//! experiment:
//!
//! 1. Validate `num_paths`
//! 2. Resolve the seed (call override, else stored seed, else OS entropy)
//! 3. Draw one standard normal per path and evaluate the discounted
//!    terminal price `exp(-rT)·S_T` in closed form
//! 4. Accumulate call and put payoffs against the discounted strike
//!    `K·exp(-rT)`
//! 5. Average
//!
//! Steps 3 to 5 are the usual `exp(-rT)·mean(payoff)` with the discount
//! applied per path, so `exp(rT)` is never formed and large `r·T` cannot
//! overflow.
//!
//! The engine holds no mutable state, so one instance can be shared across
//! threads; every call builds and owns its own generator(s).

use std::time::Instant;

use pricer_core::math::gbm::{call_payoff, put_payoff, GbmTerminal};
use pricer_core::types::{OptionParameters, PricingError};
use rayon::prelude::*;
use tracing::{debug, trace};

use super::accumulator::PayoffAccumulator;
use super::config::{EngineConfig, Execution};
use super::result::SimulationResult;
use crate::rng::{fresh_seed, PricerRng};

/// Normals drawn per batch inside an optimized chunk.
const NORMAL_BATCH: usize = 1024;

/// European option Monte Carlo engine under GBM.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingEngine;
///
/// let engine = PricingEngine::new(100.0, 100.0, 0.05, 0.2, 1.0, Some(48)).unwrap();
///
/// let first = engine.price(100_000).unwrap();
/// let again = engine.price(100_000).unwrap();
/// assert_eq!(first.prices(), again.prices());
///
/// // A per-call seed overrides the stored one for that call only
/// let other = engine.price_with_seed(100_000, Some(7)).unwrap();
/// assert_ne!(first.prices(), other.prices());
/// assert_eq!(engine.price(100_000).unwrap(), first);
/// ```
#[derive(Clone, Debug)]
pub struct PricingEngine {
    params: OptionParameters,
    kernel: GbmTerminal<f64>,
    /// `K·exp(-rT)`
    strike_pv: f64,
    /// Scale applied to payoffs before squaring
    payoff_scale: f64,
    config: EngineConfig,
}

impl PricingEngine {
    /// Validates the parameters and builds a reference-variant engine.
    ///
    /// Construction touches no random state.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameter` if `volatility`,
    /// `initial_price`, `strike_price` or `time_to_expiry` is negative, or if
    /// any input is not finite.
    pub fn new(
        initial_price: f64,
        strike_price: f64,
        risk_free_rate: f64,
        volatility: f64,
        time_to_expiry: f64,
        seed: Option<u64>,
    ) -> Result<Self, PricingError> {
        let params = OptionParameters::new(
            initial_price,
            strike_price,
            risk_free_rate,
            volatility,
            time_to_expiry,
            seed,
        )?;
        Ok(Self::from_parameters(params))
    }

    /// Builds an engine from already validated parameters.
    pub fn from_parameters(params: OptionParameters) -> Self {
        let strike_pv = params.strike_price() * params.discount_factor();
        Self {
            kernel: GbmTerminal::discounted(&params),
            strike_pv,
            payoff_scale: payoff_scale(params.initial_price(), strike_pv),
            params,
            config: EngineConfig::default(),
        }
    }

    /// Replaces the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the option parameters.
    #[inline]
    pub fn parameters(&self) -> &OptionParameters {
        &self.params
    }

    /// Returns the engine configuration.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Prices the call and put with the stored seed.
    ///
    /// # Errors
    ///
    /// See [`price_with_seed`](Self::price_with_seed).
    #[inline]
    pub fn price(&self, num_paths: usize) -> Result<SimulationResult, PricingError> {
        self.price_with_seed(num_paths, None)
    }

    /// Prices the call and put over `num_paths` paths.
    ///
    /// `seed` overrides the stored seed for this call only. When neither is
    /// set a fresh seed is drawn from the OS and recorded on the result.
    ///
    /// # Errors
    ///
    /// - `PricingError::InvalidArgument` if `num_paths == 0`
    /// - `PricingError::EntropySource` if no seed is set and the OS source fails
    pub fn price_with_seed(
        &self,
        num_paths: usize,
        seed: Option<u64>,
    ) -> Result<SimulationResult, PricingError> {
        if num_paths == 0 {
            return Err(PricingError::InvalidArgument {
                name: "num_paths",
                reason: "must be at least 1".to_string(),
            });
        }

        let seed = match seed.or(self.params.seed()) {
            Some(seed) => seed,
            None => fresh_seed()?,
        };

        debug!(
            num_paths,
            seed,
            execution = %self.config.execution(),
            summation = %self.config.summation(),
            "Starting Monte Carlo pricing"
        );
        let start = Instant::now();

        let totals = match self.config.execution() {
            Execution::Reference => self.simulate_reference(num_paths, seed),
            Execution::Optimized => self.simulate_optimized(num_paths, seed),
        };
        let result = totals.finish(1.0, seed);

        debug!(
            call_price = result.call_price,
            put_price = result.put_price,
            elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
            "Monte Carlo pricing complete"
        );
        Ok(result)
    }

    /// Scalar loop: one generator, one normal per path, one running total.
    fn simulate_reference(&self, num_paths: usize, seed: u64) -> PayoffAccumulator {
        let strike = self.strike_pv;
        let mut rng = PricerRng::from_seed(seed);
        let mut totals = self.accumulator();

        for _ in 0..num_paths {
            let terminal = self.kernel.terminal_price(rng.gen_normal());
            totals.add(call_payoff(terminal, strike), put_payoff(terminal, strike));
        }

        totals
    }

    /// Chunked parallel loop.
    ///
    /// Chunk `i` covers paths `[i * chunk_size, min((i + 1) * chunk_size, n))`
    /// and draws from stream `i` of `seed`. Partial totals are merged in chunk
    /// order, so the result depends on `(seed, num_paths, chunk_size)` and not
    /// on the rayon thread count.
    fn simulate_optimized(&self, num_paths: usize, seed: u64) -> PayoffAccumulator {
        let chunk_size = self.config.chunk_size();
        let n_chunks = num_paths.div_ceil(chunk_size);

        let partials: Vec<PayoffAccumulator> = (0..n_chunks)
            .into_par_iter()
            .map(|chunk| {
                let len = chunk_size.min(num_paths - chunk * chunk_size);
                trace!(chunk, len, "Simulating chunk");
                self.simulate_chunk(len, PricerRng::for_stream(seed, chunk as u64))
            })
            .collect();

        let mut totals = self.accumulator();
        for partial in &partials {
            totals.merge(partial);
        }
        totals
    }

    fn accumulator(&self) -> PayoffAccumulator {
        PayoffAccumulator::with_scale(self.config.summation(), self.payoff_scale)
    }

    fn simulate_chunk(&self, len: usize, mut rng: PricerRng) -> PayoffAccumulator {
        let strike = self.strike_pv;
        let mut totals = self.accumulator();
        let mut normals = vec![0.0; NORMAL_BATCH.min(len)];

        let mut remaining = len;
        while remaining > 0 {
            let batch = &mut normals[..NORMAL_BATCH.min(remaining)];
            rng.fill_normal(batch);
            for &z in batch.iter() {
                let terminal = self.kernel.terminal_price(z);
                totals.add(call_payoff(terminal, strike), put_payoff(terminal, strike));
            }
            remaining -= batch.len();
        }

        totals
    }
}

/// Magnitude of the larger payoff driver, or 1 when it is zero or not normal.
fn payoff_scale(spot: f64, strike_pv: f64) -> f64 {
    let scale = spot.max(strike_pv);
    if scale.is_normal() {
        scale
    } else {
        1.0
    }
}
