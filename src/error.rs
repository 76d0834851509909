//! Errors raised while evaluating exceedance probabilities.

use crate::imt::Imt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The model has no ground-motion ceiling defined for this intensity measure type.
    #[error("unsupported intensity measure type: {0}")]
    UnsupportedImt(Imt),

    /// A distribution parameter is outside the domain the models are defined on.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// The probability bounds leave no mass to rescale into.
    #[error("degenerate truncation bounds: p_hi = {p_hi}, p_lo = {p_lo}")]
    DegenerateTruncation { p_hi: f64, p_lo: f64 },

    #[error("unknown exceedance model: {0}")]
    UnknownModel(String),

    #[error("unknown intensity measure type: {0}")]
    UnknownImt(String),
}

pub type Result<T> = std::result::Result<T, Error>;
