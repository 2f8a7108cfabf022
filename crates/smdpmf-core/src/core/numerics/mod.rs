//! Pure numerical kernels of the pulling analysis.
//!
//! Every function in this module is stateless and operates on plain slices, so the
//! pipeline stages in [`crate::engine`] can be composed and tested against synthetic
//! data of arbitrary size. The kernels follow the order in which a trajectory moves
//! through the pipeline:
//!
//! - **Ordering** ([`ordering`]) - stable reordering of samples by ascending distance
//! - **Smoothing** ([`smoothing`]) - "valid" mode moving average
//! - **Integration** ([`integration`]) - cumulative trapezoidal work on a non-uniform grid
//! - **Ensembles** ([`ensemble`]) - truncation to a common length and per-sample statistics
//! - **Jarzynski** ([`jarzynski`]) - exponential work average in log-sum-exp form

pub mod ensemble;
pub mod integration;
pub mod jarzynski;
pub mod ordering;
pub mod smoothing;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NumericsError {
    #[error("Invalid smoothing window {window} for a series of length {len}")]
    InvalidWindow { window: usize, len: usize },

    #[error("Series length mismatch: {left} vs {right} samples")]
    LengthMismatch { left: usize, right: usize },

    #[error("Ensemble contains no trajectories")]
    EmptyEnsemble,

    #[error("Thermal energy kT must be positive and finite (got {0})")]
    InvalidThermalEnergy(f64),
}

pub(crate) fn ensure_same_length(left: &[f64], right: &[f64]) -> Result<(), NumericsError> {
    if left.len() != right.len() {
        return Err(NumericsError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}
