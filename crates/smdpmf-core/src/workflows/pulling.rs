use crate::core::io::discovery::TrajectoryFiles;
use crate::core::io::export::{self, TrajectoryRow};
use crate::core::models::condition::ConditionSpec;
use crate::core::models::profile::{EnsembleProfile, FreeEnergyCurve, WorkAnalysis};
use crate::engine::config::PipelineConfig;
use crate::engine::error::EngineError;
use crate::engine::loader;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument};

/// Everything computed for one condition.
#[derive(Debug, Clone)]
pub struct ConditionReport {
    pub condition: ConditionSpec,
    pub files: Vec<TrajectoryFiles>,
    /// Smoothed force against smoothed distance.
    pub force: EnsembleProfile,
    pub work: WorkAnalysis,
    pub free_energy: FreeEnergyCurve,
}

impl ConditionReport {
    pub fn n_trajectories(&self) -> usize {
        self.files.len()
    }

    /// Writes the condition's curve tables into `dir` and returns the created paths.
    pub fn export_csv(&self, dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
        let name = &self.condition.name;
        let mut written = Vec::new();

        let path = dir.join(format!("{name}_force.csv"));
        export::write_band_csv(&path, &self.force, "force")?;
        written.push(path);

        let path = dir.join(format!("{name}_work.csv"));
        export::write_band_csv(&path, &self.work.profile, "work")?;
        written.push(path);

        let path = dir.join(format!("{name}_free_energy.csv"));
        export::write_series_csv(
            &path,
            &self.free_energy.raw,
            ["distance_nm", "free_energy_kj_mol"],
        )?;
        written.push(path);

        if let Some(smoothed) = &self.free_energy.smoothed {
            let path = dir.join(format!("{name}_free_energy_smoothed.csv"));
            export::write_series_csv(&path, smoothed, ["distance_nm", "free_energy_kj_mol"])?;
            written.push(path);
        }

        let rows: Vec<TrajectoryRow> = self
            .files
            .iter()
            .zip(&self.work.trajectories)
            .map(|(files, work)| TrajectoryRow {
                index: files.index,
                samples: work.work.len(),
                max_work: work.max_work,
                force_file: files.force.display().to_string(),
                distance_file: files.distance.display().to_string(),
            })
            .collect();
        let path = dir.join(format!("{name}_trajectories.csv"));
        export::write_trajectory_table(&path, &rows)?;
        written.push(path);

        Ok(written)
    }
}

#[derive(Debug)]
pub enum ConditionOutcome {
    Completed(Box<ConditionReport>),
    Failed { name: String, error: EngineError },
}

/// Outcomes in configured condition order.
#[derive(Debug, Default)]
pub struct PullingReport {
    pub outcomes: Vec<ConditionOutcome>,
}

impl PullingReport {
    pub fn completed(&self) -> impl Iterator<Item = &ConditionReport> {
        self.outcomes.iter().filter_map(|o| match o {
            ConditionOutcome::Completed(report) => Some(report.as_ref()),
            ConditionOutcome::Failed { .. } => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &EngineError)> {
        self.outcomes.iter().filter_map(|o| match o {
            ConditionOutcome::Failed { name, error } => Some((name.as_str(), error)),
            ConditionOutcome::Completed(_) => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Loads and analyses a single condition.
#[instrument(skip_all, name = "condition_analysis", fields(condition = %spec.name))]
pub fn analyze_condition(
    spec: &ConditionSpec,
    config: &PipelineConfig,
) -> Result<ConditionReport, EngineError> {
    let ensemble = loader::load_condition(spec, &config.input)?;
    let force = tasks::force_profile::run(&ensemble.trajectories, config.smoothing.force_window)?;
    let work = tasks::work_profile::run(&ensemble.trajectories, config.smoothing.work_window)?;
    let free_energy = tasks::free_energy::run(
        &spec.name,
        &work.trajectories,
        &config.thermodynamics,
        config.smoothing.free_energy_window,
    )?;

    Ok(ConditionReport {
        condition: spec.clone(),
        files: ensemble.files,
        force,
        work,
        free_energy,
    })
}

fn analyze_and_report(
    spec: &ConditionSpec,
    config: &PipelineConfig,
    reporter: &ProgressReporter,
) -> Result<ConditionReport, EngineError> {
    let result = analyze_condition(spec, config);
    match &result {
        Ok(report) => {
            info!(
                "Condition '{}' done: {} trajectories, {} free-energy samples",
                spec.name,
                report.n_trajectories(),
                report.free_energy.raw.len()
            );
            reporter.report(Progress::ConditionDone {
                name: spec.name.clone(),
                trajectories: report.n_trajectories(),
            });
        }
        Err(e) => {
            error!("Condition '{}' failed: {}", spec.name, e);
            reporter.report(Progress::ConditionFailed {
                name: spec.name.clone(),
                reason: e.to_string(),
            });
        }
    }
    reporter.report(Progress::TaskIncrement);
    result
}

/// Analyses every configured condition in parallel on the global rayon pool.
///
/// A failing condition is recorded in the report and the others continue, unless
/// `fail_fast` is set, in which case the first failure is returned as
/// [`EngineError::ConditionFailed`].
#[instrument(skip_all, name = "pulling_workflow")]
pub fn run(
    config: &PipelineConfig,
    reporter: &ProgressReporter,
) -> Result<PullingReport, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Pulling analysis",
    });
    reporter.report(Progress::TaskStart {
        total_steps: config.conditions.len() as u64,
    });
    info!(
        "Analysing {} condition(s) on {} thread(s)",
        config.conditions.len(),
        rayon::current_num_threads()
    );

    let outcomes = if config.fail_fast {
        config
            .conditions
            .par_iter()
            .map(|spec| {
                analyze_and_report(spec, config, reporter)
                    .map(|report| ConditionOutcome::Completed(Box::new(report)))
                    .map_err(|e| EngineError::ConditionFailed {
                        name: spec.name.clone(),
                        source: Box::new(e),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
    } else {
        let outcomes: Vec<ConditionOutcome> = config
            .conditions
            .par_iter()
            .map(|spec| match analyze_and_report(spec, config, reporter) {
                Ok(report) => ConditionOutcome::Completed(Box::new(report)),
                Err(error) => ConditionOutcome::Failed {
                    name: spec.name.clone(),
                    error,
                },
            })
            .collect();
        Ok(outcomes)
    };

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let report = PullingReport {
        outcomes: outcomes?,
    };
    info!(
        "Pulling analysis complete: {} succeeded, {} failed",
        report.completed().count(),
        report.failures().count()
    );
    Ok(report)
}
