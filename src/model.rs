//! # Exceedance models
//!
//! An exceedance model turns the output of a ground motion model, a mean `μ`
//! and standard deviation `σ` of log ground motion, into the probability that
//! a ground motion level is exceeded. Models differ in how they treat the
//! tails of the distribution: no dispersion at all, a plain normal, a normal
//! truncated at `μ + nσ` (on one or both sides), a fixed-σ mixture, or an
//! upper truncation capped by an intensity-measure-dependent ceiling.
//!
//! Every model takes the same arguments, even those it ignores, so that
//! callers can switch models without changing call sites.

use crate::error::{Error, Result};
use crate::imt::Imt;
use crate::sequence::{ArrayXySequence, XySequence};
use crate::stats::{self, Normal};
use log::trace;
use rayon::prelude::*;
use std::fmt::Display;
use std::str::FromStr;

/// Dispersion imposed by the PEER verification models, whatever σ is supplied.
const PEER_SIGMA: f64 = 0.65;

/// The distribution parameters of a single exceedance evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExceedanceParams {
    /// Mean of log ground motion.
    pub mean: f64,
    /// Standard deviation of log ground motion.
    pub sigma: f64,
    /// Truncation level, in units of `sigma`.
    pub truncation: f64,
    /// Intensity measure type of the ground motion.
    pub imt: Imt,
}

impl ExceedanceParams {
    pub fn new(mean: f64, sigma: f64, truncation: f64, imt: Imt) -> Self {
        Self {
            mean,
            sigma,
            truncation,
            imt,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExceedanceModel {
    /// A complementary unit step at `μ`. Ignores `σ`, truncation and imt.
    NoUncertainty,
    /// Untruncated normal. Ignores truncation and imt.
    TruncationOff,
    /// Normal truncated above `μ + nσ`. Ignores imt.
    TruncationUpperOnly,
    /// Normal truncated at `μ ± nσ`. Ignores imt.
    TruncationLowerUpper,
    /// Untruncated normal with `σ` fixed to 0.65. Ignores `σ`, truncation
    /// and imt.
    PeerMixtureReference,
    /// Heavy-tailed model: an equal-weight mixture of two untruncated normals
    /// with dispersions 0.8σ and 1.2σ, where σ is fixed to 0.65. Ignores `σ`,
    /// truncation and imt.
    PeerMixtureModel,
    /// Upper truncation at `min(μ + nσ, ln(max))`, where `max` is the
    /// imt-dependent ground motion ceiling of [`max_intensity`]. Used for the
    /// clamps historically applied to central and eastern US ground motions.
    NshmCeusMaxIntensity,
}

use ExceedanceModel::*;

impl ExceedanceModel {
    pub const ALL: [ExceedanceModel; 7] = [
        NoUncertainty,
        TruncationOff,
        TruncationUpperOnly,
        TruncationLowerUpper,
        PeerMixtureReference,
        PeerMixtureModel,
        NshmCeusMaxIntensity,
    ];

    /// The stable identifier of the model, used in configuration.
    pub fn key(&self) -> &'static str {
        match self {
            NoUncertainty => "NONE",
            TruncationOff => "TRUNCATION_OFF",
            TruncationUpperOnly => "TRUNCATION_UPPER_ONLY",
            TruncationLowerUpper => "TRUNCATION_LOWER_UPPER",
            PeerMixtureReference => "PEER_MIXTURE_REFERENCE",
            PeerMixtureModel => "PEER_MIXTURE_MODEL",
            NshmCeusMaxIntensity => "NSHM_CEUS_MAX_INTENSITY",
        }
    }

    /// Whether evaluations depend on the intensity measure type.
    pub fn uses_imt(&self) -> bool {
        matches!(self, NshmCeusMaxIntensity)
    }

    /// The probability of exceeding `value`.
    pub fn exceedance(&self, params: &ExceedanceParams, value: f64) -> Result<f64> {
        let kernel = self.kernel(params)?;
        check_value(value)?;
        Ok(kernel.eval(value))
    }

    /// Writes the probability of exceeding each x-value of `sequence` into
    /// its y-value, and hands the same sequence back. A NaN x-value is an
    /// error, and then no y-value is written.
    pub fn exceedance_curve<'a, S: XySequence + ?Sized>(
        &self,
        params: &ExceedanceParams,
        sequence: &'a mut S,
    ) -> Result<&'a mut S> {
        let kernel = self.kernel(params)?;
        trace!("{} curve over {} points", self, sequence.len());
        kernel.fill(sequence)?;
        Ok(sequence)
    }

    /// Same as [`Self::exceedance_curve`], with points evaluated in parallel.
    pub fn par_exceedance_curve<'a>(
        &self,
        params: &ExceedanceParams,
        sequence: &'a mut ArrayXySequence,
    ) -> Result<&'a mut ArrayXySequence> {
        let kernel = self.kernel(params)?;
        trace!("{} parallel curve over {} points", self, sequence.len());
        kernel.par_fill(sequence)?;
        Ok(sequence)
    }

    /// Resolves the imt ceiling, if this model has one. `Ok(None)` for models
    /// that ignore the imt.
    pub(crate) fn ceiling(&self, imt: Imt) -> Result<Option<f64>> {
        match self {
            NshmCeusMaxIntensity => Ok(Some(max_intensity(imt)?.ln())),
            _ => Ok(None),
        }
    }

    fn kernel(&self, params: &ExceedanceParams) -> Result<Kernel> {
        let ceiling = self.ceiling(params.imt)?;
        self.bind(params.mean, params.sigma, params.truncation, ceiling)
    }

    /// Validates the parameters this model reads and computes the per-call
    /// probability bounds. `ceiling` is the log ground motion cap, only read
    /// by [`NshmCeusMaxIntensity`].
    pub(crate) fn bind(
        &self,
        mean: f64,
        sigma: f64,
        n: f64,
        ceiling: Option<f64>,
    ) -> Result<Kernel> {
        check_mean(mean)?;
        let kernel = match self {
            NoUncertainty => Kernel::Step { mean },
            TruncationOff => {
                check_sigma(sigma)?;
                Kernel::bounded(Normal::new(mean, sigma), 0.0, 1.0)?
            }
            TruncationUpperOnly => {
                check_sigma(sigma)?;
                check_truncation(n)?;
                let normal = Normal::new(mean, sigma);
                Kernel::bounded(normal, normal.truncation_probability(n), 1.0)?
            }
            TruncationLowerUpper => {
                check_sigma(sigma)?;
                check_truncation(n)?;
                let normal = Normal::new(mean, sigma);
                let p_hi = normal.truncation_probability(n);
                Kernel::bounded(normal, p_hi, 1.0 - p_hi)?
            }
            PeerMixtureReference => Kernel::bounded(Normal::new(mean, PEER_SIGMA), 0.0, 1.0)?,
            PeerMixtureModel => Kernel::Mixture {
                lower: Normal::new(mean, PEER_SIGMA * 0.8),
                upper: Normal::new(mean, PEER_SIGMA * 1.2),
            },
            NshmCeusMaxIntensity => {
                check_sigma(sigma)?;
                check_truncation(n)?;
                let normal = Normal::new(mean, sigma);
                let p_hi = match ceiling {
                    Some(max) => normal.truncation_probability_capped(n, max),
                    None => normal.truncation_probability(n),
                };
                Kernel::bounded(normal, p_hi, 1.0)?
            }
        };
        Ok(kernel)
    }
}

/// Ceiling on ground motion, in linear units, applied by
/// [`ExceedanceModel::NshmCeusMaxIntensity`].
///
/// Spectral accelerations are capped at 6 g below 0.75 s and left unbounded
/// from 0.75 s up; PGA is capped at 3 g and PGV at 400 cm/s. The unbounded
/// case is `f64::MAX`, whose log is finite.
pub fn max_intensity(imt: Imt) -> Result<f64> {
    if imt.is_sa() {
        return Ok(if imt < Imt::SA0P75 { 6.0 } else { f64::MAX });
    }
    match imt {
        Imt::PGA => Ok(3.0),
        Imt::PGV => Ok(400.0),
        _ => Err(Error::UnsupportedImt(imt)),
    }
}

fn check_mean(mean: f64) -> Result<()> {
    if !mean.is_finite() {
        return Err(Error::InvalidParameter {
            name: "mean",
            value: mean,
        });
    }
    Ok(())
}

pub(crate) fn check_value(value: f64) -> Result<()> {
    if value.is_nan() {
        return Err(Error::InvalidParameter {
            name: "value",
            value,
        });
    }
    Ok(())
}

fn check_sigma(sigma: f64) -> Result<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "sigma",
            value: sigma,
        });
    }
    Ok(())
}

fn check_truncation(n: f64) -> Result<()> {
    // an infinite truncation level is the same as no truncation
    if n.is_nan() || n < 0.0 {
        return Err(Error::InvalidParameter {
            name: "truncation",
            value: n,
        });
    }
    Ok(())
}

/// A model with its parameters bound, ready to evaluate any number of values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Kernel {
    Step {
        mean: f64,
    },
    Bounded {
        normal: Normal,
        p_hi: f64,
        p_lo: f64,
    },
    Mixture {
        lower: Normal,
        upper: Normal,
    },
}

impl Kernel {
    fn bounded(normal: Normal, p_hi: f64, p_lo: f64) -> Result<Self> {
        // also rejects NaN bounds
        if p_lo - p_hi > 0.0 {
            Ok(Kernel::Bounded { normal, p_hi, p_lo })
        } else {
            Err(Error::DegenerateTruncation { p_hi, p_lo })
        }
    }

    #[inline]
    pub(crate) fn eval(&self, x: f64) -> f64 {
        match *self {
            Kernel::Step { mean } => stats::step(mean, x),
            Kernel::Bounded { normal, p_hi, p_lo } => normal.bounded_ccdf(x, p_hi, p_lo),
            Kernel::Mixture { lower, upper } => {
                let p1 = lower.bounded_ccdf(x, 0.0, 1.0);
                let p2 = upper.bounded_ccdf(x, 0.0, 1.0);
                (p1 + p2) / 2.0
            }
        }
    }

    /// Fills every y-value, or none of them if any x-value is NaN.
    pub(crate) fn fill<S: XySequence + ?Sized>(&self, sequence: &mut S) -> Result<()> {
        for i in 0..sequence.len() {
            check_value(sequence.x(i))?;
        }
        for i in 0..sequence.len() {
            let y = self.eval(sequence.x(i));
            sequence.set_y(i, y);
        }
        Ok(())
    }

    pub(crate) fn par_fill(&self, sequence: &mut ArrayXySequence) -> Result<()> {
        sequence.xs().iter().try_for_each(|&x| check_value(x))?;
        let (xs, ys) = sequence.split_mut();
        ys.par_iter_mut()
            .zip(xs.par_iter())
            .for_each(|(y, &x)| *y = self.eval(x));
        Ok(())
    }
}

impl Display for ExceedanceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ExceedanceModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|model| model.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| Error::UnknownModel(s.to_owned()))
    }
}
