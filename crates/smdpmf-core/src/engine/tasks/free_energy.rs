use crate::core::models::profile::{FreeEnergyCurve, Series, WorkProfile};
use crate::core::numerics::ensemble::TrajectoryEnsemble;
use crate::core::numerics::jarzynski::{Thermodynamics, free_energy_profile};
use crate::core::numerics::smoothing::moving_average;
use crate::engine::error::EngineError;
use tracing::{debug, instrument};

/// Jarzynski free energy of a condition from the unsmoothed work of its trajectories.
///
/// Work curves are cut to the shortest one; the distance axis is the mean of the
/// equally cut distance grids. `window`, when set, post-smooths both axes.
#[instrument(skip_all, name = "free_energy_task", fields(condition = condition))]
pub fn run(
    condition: &str,
    work: &[WorkProfile],
    thermodynamics: &Thermodynamics,
    window: Option<usize>,
) -> Result<FreeEnergyCurve, EngineError> {
    if work.is_empty() {
        return Err(EngineError::EmptyEnsemble(condition.to_string()));
    }

    let distances: Vec<&[f64]> = work.iter().map(|p| p.work.x.as_slice()).collect();
    let values: Vec<&[f64]> = work.iter().map(|p| p.work.y.as_slice()).collect();

    let x = TrajectoryEnsemble::from_truncated(&distances)?.mean();
    let dg = free_energy_profile(&TrajectoryEnsemble::from_truncated(&values)?, thermodynamics)?;
    let raw = Series::new(x, dg)?;

    let smoothed = window
        .map(|w| -> Result<Series, EngineError> {
            Ok(Series::new(
                moving_average(&raw.x, w)?,
                moving_average(&raw.y, w)?,
            )?)
        })
        .transpose()?;

    debug!(
        "Free energy: {} samples, final ΔG {:?} kJ/mol",
        raw.len(),
        raw.last_y()
    );
    Ok(FreeEnergyCurve {
        condition: condition.to_string(),
        n_trajectories: work.len(),
        raw,
        smoothed,
    })
}
