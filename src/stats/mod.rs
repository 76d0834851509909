//! Normal-distribution primitives shared by every exceedance model.
//!
//! All functions here are unchecked: a zero standard deviation or equal
//! probability bounds produce non-finite results. Parameter validation
//! happens in [`crate::model`] before these are reached.

mod erf;

pub use erf::erf;

use std::f64::consts::SQRT_2;

/// A normal distribution of (log) ground motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normal {
    mean: f64,
    std_dev: f64,
}

impl Default for Normal {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
        }
    }
}

impl Normal {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    pub fn ccdf(&self, x: f64) -> f64 {
        ccdf(self.mean, self.std_dev, x)
    }

    pub fn bounded_ccdf(&self, x: f64, p_hi: f64, p_lo: f64) -> f64 {
        bounded_ccdf(self.mean, self.std_dev, x, p_hi, p_lo)
    }

    /// Probability mass above `mean + n * std_dev`.
    pub fn truncation_probability(&self, n: f64) -> f64 {
        truncation_probability(self.mean, self.std_dev, n)
    }

    /// Probability mass above `min(mean + n * std_dev, max)`.
    pub fn truncation_probability_capped(&self, n: f64, max: f64) -> f64 {
        truncation_probability_capped(self.mean, self.std_dev, n, max)
    }
}

/// Probability that a normal variable with the given mean and standard
/// deviation exceeds `x`, without truncation.
pub fn ccdf(mean: f64, std_dev: f64, x: f64) -> f64 {
    (1.0 + erf((mean - x) / (std_dev * SQRT_2))) * 0.5
}

/// Complementary cdf rescaled so that `p_hi` maps to 0 and `p_lo` maps to 1.
pub fn bounded_ccdf(mean: f64, std_dev: f64, x: f64, p_hi: f64, p_lo: f64) -> f64 {
    let p = ccdf(mean, std_dev, x);
    clamp_probability((p - p_hi) / (p_lo - p_hi))
}

/// Pulls values that drifted outside `[0, 1]` back onto the boundary.
#[inline]
pub fn clamp_probability(p: f64) -> f64 {
    if p < 0.0 {
        0.0
    } else if p > 1.0 {
        1.0
    } else {
        p
    }
}

pub fn truncation_probability(mean: f64, std_dev: f64, n: f64) -> f64 {
    ccdf(mean, std_dev, mean + n * std_dev)
}

/// As [`truncation_probability`], with the truncation point capped at `max`
/// (same units as `mean`).
pub fn truncation_probability_capped(mean: f64, std_dev: f64, n: f64, max: f64) -> f64 {
    ccdf(mean, std_dev, (mean + n * std_dev).min(max))
}

/// Complementary unit step: the zero-dispersion limit of [`ccdf`].
#[inline]
pub fn step(mean: f64, x: f64) -> f64 {
    if x < mean {
        1.0
    } else {
        0.0
    }
}
