//! Analysis stages applied to the trajectories of one condition.
//!
//! Each stage is a pure function of already loaded, distance-sorted trajectories:
//! [`force_profile`] smooths the raw force, [`work_profile`] integrates it into
//! cumulative work and [`free_energy`] combines the work curves with the Jarzynski
//! estimator.

pub mod force_profile;
pub mod free_energy;
pub mod work_profile;

use crate::core::models::profile::{EnsembleProfile, Series};
use crate::core::numerics::NumericsError;
use crate::core::numerics::ensemble::TrajectoryEnsemble;

/// Cuts paired `x`/`y` curves to their common length and computes the statistics of `y`.
///
/// The shared axis is the elementwise mean of the truncated `x` curves.
pub(crate) fn ensemble_profile(
    xs: &[Vec<f64>],
    ys: &[Vec<f64>],
) -> Result<EnsembleProfile, NumericsError> {
    let x = TrajectoryEnsemble::from_truncated(xs)?;
    let y = TrajectoryEnsemble::from_truncated(ys)?;
    if x.len() != y.len() {
        return Err(NumericsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }

    let members = x
        .members()
        .zip(y.members())
        .map(|(mx, my)| Series::new(mx, my))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EnsembleProfile {
        members,
        x: x.mean(),
        mean: y.mean(),
        std_dev: y.std_dev(),
    })
}
