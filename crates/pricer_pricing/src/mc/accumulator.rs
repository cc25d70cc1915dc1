//! Running payoff totals.
//!
//! [`PayoffAccumulator`] holds the call and put sums (and sums of squares,
//! for standard errors) of one simulation or one parallel chunk. Partial
//! accumulators are combined with [`merge`](PayoffAccumulator::merge).
//!
//! Squares are taken of `payoff / scale`, so payoffs near the top of the
//! `f64` range still give a finite standard error when the accumulator is
//! built with a matching [`with_scale`](PayoffAccumulator::with_scale).

use super::config::Summation;
use super::result::SimulationResult;

/// Sum of payoffs and sum of squared scaled payoffs of one leg.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct LegTotals {
    sum: RunningSum,
    sum_sq: RunningSum,
}

impl LegTotals {
    #[inline]
    fn add(&mut self, payoff: f64, scale: f64, summation: Summation) {
        let scaled = payoff / scale;
        self.sum.add(payoff, summation);
        self.sum_sq.add(scaled * scaled, summation);
    }

    #[inline]
    fn merge(&mut self, other: &LegTotals, summation: Summation) {
        self.sum.merge(&other.sum, summation);
        self.sum_sq.merge(&other.sum_sq, summation);
    }

    /// Undiscounted sample mean and standard error of the mean.
    ///
    /// An overflowed sum of squares reports an infinite standard error.
    fn mean_and_error(&self, count: u64, scale: f64) -> (f64, f64) {
        let n = count as f64;
        let mean = self.sum.total() / n;
        if count < 2 {
            return (mean, 0.0);
        }
        let second_moment = self.sum_sq.total() / n;
        if !second_moment.is_finite() {
            return (mean, f64::INFINITY);
        }
        let scaled_mean = mean / scale;
        // Rounding can push a zero-variance sample slightly negative.
        let variance = ((second_moment - scaled_mean * scaled_mean) * n / (n - 1.0)).max(0.0);
        (mean, (variance / n).sqrt() * scale)
    }
}

/// `f64` running sum with an optional Neumaier compensation term.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct RunningSum {
    sum: f64,
    compensation: f64,
}

impl RunningSum {
    #[inline]
    fn add(&mut self, value: f64, summation: Summation) {
        match summation {
            Summation::Plain => self.sum += value,
            Summation::Compensated => {
                let t = self.sum + value;
                if self.sum.abs() >= value.abs() {
                    self.compensation += (self.sum - t) + value;
                } else {
                    self.compensation += (value - t) + self.sum;
                }
                self.sum = t;
            }
        }
    }

    #[inline]
    fn merge(&mut self, other: &RunningSum, summation: Summation) {
        self.add(other.sum, summation);
        self.compensation += other.compensation;
    }

    #[inline]
    fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Call and put payoff totals over a set of paths.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{PayoffAccumulator, Summation};
///
/// let mut acc = PayoffAccumulator::new(Summation::Plain);
/// acc.add(5.0, 0.0);
/// acc.add(0.0, 3.0);
/// assert_eq!(acc.count(), 2);
/// assert_eq!(acc.call_total(), 5.0);
/// assert_eq!(acc.put_total(), 3.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PayoffAccumulator {
    summation: Summation,
    scale: f64,
    count: u64,
    call: LegTotals,
    put: LegTotals,
}

impl PayoffAccumulator {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new(summation: Summation) -> Self {
        Self::with_scale(summation, 1.0)
    }

    /// Creates an empty accumulator that squares `payoff / scale`.
    ///
    /// `scale` should be of the order of the largest expected payoff. It does
    /// not change the totals or the estimates, only the range over which the
    /// standard error stays finite. A non-positive or non-normal scale is
    /// replaced by 1.
    pub fn with_scale(summation: Summation, scale: f64) -> Self {
        let scale = if scale.is_normal() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self {
            summation,
            scale,
            count: 0,
            call: LegTotals::default(),
            put: LegTotals::default(),
        }
    }

    /// Adds one path's call and put payoffs.
    #[inline]
    pub fn add(&mut self, call_payoff: f64, put_payoff: f64) {
        self.count += 1;
        self.call.add(call_payoff, self.scale, self.summation);
        self.put.add(put_payoff, self.scale, self.summation);
    }

    /// Folds another accumulator's totals into this one.
    ///
    /// Both accumulators must share the same scale.
    pub fn merge(&mut self, other: &PayoffAccumulator) {
        debug_assert_eq!(self.scale, other.scale, "merging accumulators of different scale");
        self.count += other.count;
        self.call.merge(&other.call, self.summation);
        self.put.merge(&other.put, self.summation);
    }

    /// Number of paths accumulated.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Undiscounted sum of call payoffs.
    #[inline]
    pub fn call_total(&self) -> f64 {
        self.call.sum.total()
    }

    /// Undiscounted sum of put payoffs.
    #[inline]
    pub fn put_total(&self) -> f64 {
        self.put.sum.total()
    }

    /// Averages and discounts the totals.
    ///
    /// Must only be called with `count() >= 1`; the engine validates the path
    /// count before any sampling.
    pub fn finish(&self, discount_factor: f64, seed: u64) -> SimulationResult {
        debug_assert!(self.count > 0, "finish on an empty accumulator");
        let (call_mean, call_se) = self.call.mean_and_error(self.count, self.scale);
        let (put_mean, put_se) = self.put.mean_and_error(self.count, self.scale);

        SimulationResult {
            call_price: call_mean * discount_factor,
            put_price: put_mean * discount_factor,
            call_std_error: call_se * discount_factor,
            put_std_error: put_se * discount_factor,
            num_paths: self.count,
            seed,
        }
    }
}
