use super::ensemble_profile;
use crate::core::models::profile::{Series, WorkAnalysis, WorkProfile};
use crate::core::models::trajectory::Trajectory;
use crate::core::numerics::integration::cumulative_trapezoid;
use crate::core::numerics::smoothing::moving_average;
use crate::engine::error::EngineError;
use tracing::{info, instrument};

fn integrate(trajectory: &Trajectory, window: usize) -> Result<WorkProfile, EngineError> {
    let work = cumulative_trapezoid(trajectory.distance(), trajectory.force())?;
    let smoothed = Series::new(
        moving_average(trajectory.distance(), window)?,
        moving_average(&work, window)?,
    )?;
    let max_work = smoothed.max_y().ok_or_else(|| {
        EngineError::Internal(format!(
            "smoothed work of trajectory {} is empty",
            trajectory.index()
        ))
    })?;

    Ok(WorkProfile {
        index: trajectory.index(),
        work: Series::new(trajectory.distance().to_vec(), work)?,
        smoothed,
        max_work,
    })
}

/// Cumulative work along the sorted, unsmoothed samples of every trajectory.
#[instrument(skip_all, name = "work_profile_task")]
pub fn run(trajectories: &[Trajectory], window: usize) -> Result<WorkAnalysis, EngineError> {
    let profiles = trajectories
        .iter()
        .map(|t| integrate(t, window))
        .collect::<Result<Vec<_>, _>>()?;

    for profile in &profiles {
        info!(
            "Trajectory {}: maximum work {:.2} kJ/mol",
            profile.index, profile.max_work
        );
    }

    let xs: Vec<Vec<f64>> = profiles.iter().map(|p| p.smoothed.x.clone()).collect();
    let ys: Vec<Vec<f64>> = profiles.iter().map(|p| p.smoothed.y.clone()).collect();
    let profile = ensemble_profile(&xs, &ys)?;

    Ok(WorkAnalysis {
        trajectories: profiles,
        profile,
    })
}
