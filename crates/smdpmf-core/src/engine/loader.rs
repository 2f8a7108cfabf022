use super::config::InputConfig;
use super::error::EngineError;
use crate::core::io::discovery::{TrajectoryFiles, pair_trajectory_files};
use crate::core::io::xvg::XvgFile;
use crate::core::models::condition::ConditionSpec;
use crate::core::models::trajectory::Trajectory;
use tracing::{debug, info};

/// All trajectories of one condition, each sorted by ascending distance.
#[derive(Debug, Clone)]
pub(crate) struct ConditionEnsemble {
    pub files: Vec<TrajectoryFiles>,
    pub trajectories: Vec<Trajectory>,
}

pub(crate) fn load_trajectory(
    condition: &str,
    files: &TrajectoryFiles,
    input: &InputConfig,
) -> Result<Trajectory, EngineError> {
    let force = XvgFile::read_column_from_path(&files.force, &input.columns)?;
    let distance = XvgFile::read_column_from_path(&files.distance, &input.columns)?;

    if force.len() != distance.len() {
        return Err(EngineError::MismatchedPair {
            condition: condition.to_string(),
            index: files.index,
            force_len: force.len(),
            distance_len: distance.len(),
        });
    }
    debug!(
        "Loaded trajectory {} of '{}' ({} samples)",
        files.index,
        condition,
        force.len()
    );

    let trajectory = Trajectory::new(files.index, condition, distance, force)?;
    Ok(trajectory.ordered_by_distance()?)
}

pub(crate) fn load_condition(
    spec: &ConditionSpec,
    input: &InputConfig,
) -> Result<ConditionEnsemble, EngineError> {
    let files = pair_trajectory_files(
        &spec.data_dir,
        &input.force_pattern,
        &input.distance_pattern,
        input.unindexed,
    )?;
    if files.is_empty() {
        return Err(EngineError::EmptyEnsemble(spec.name.clone()));
    }

    let trajectories = files
        .iter()
        .map(|pair| load_trajectory(&spec.name, pair, input))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        "Loaded {} trajectories for condition '{}'",
        trajectories.len(),
        spec.name
    );
    Ok(ConditionEnsemble {
        files,
        trajectories,
    })
}
