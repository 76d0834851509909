//! Probabilities of exceeding ground motion levels, given the mean and
//! standard deviation of log ground motion from a ground motion model.
//!
//! The [`model::ExceedanceModel`]s share the numerical primitives of
//! [`stats`] and fill hazard-curve [`sequence`]s in place.

pub mod cache;
pub mod error;
pub mod imt;
pub mod load;
pub mod model;
pub mod sequence;
pub mod stats;

pub use cache::{ModelCache, PreparedModel};
pub use error::{Error, Result};
pub use imt::Imt;
pub use model::{ExceedanceModel, ExceedanceParams};
pub use sequence::{ArrayXySequence, XyPoint, XySequence};
