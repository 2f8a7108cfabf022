use super::ensemble_profile;
use crate::core::models::profile::EnsembleProfile;
use crate::core::models::trajectory::Trajectory;
use crate::core::numerics::smoothing::moving_average;
use crate::engine::error::EngineError;
use tracing::{debug, instrument};

/// Smoothed force against smoothed distance for every trajectory, and their ensemble band.
#[instrument(skip_all, name = "force_profile_task")]
pub fn run(trajectories: &[Trajectory], window: usize) -> Result<EnsembleProfile, EngineError> {
    let mut xs = Vec::with_capacity(trajectories.len());
    let mut ys = Vec::with_capacity(trajectories.len());
    for trajectory in trajectories {
        xs.push(moving_average(trajectory.distance(), window)?);
        ys.push(moving_average(trajectory.force(), window)?);
    }

    let profile = ensemble_profile(&xs, &ys)?;
    debug!(
        "Force profile: {} trajectories, {} common samples",
        profile.n_members(),
        profile.len()
    );
    Ok(profile)
}
