use crate::cli::PullArgs;
use crate::config::{DefaultsConfig, PartialAppConfig};
use crate::error::{CliError, Result};
use crate::render::pulling::{
    FORCE_FIGURE, FREE_ENERGY_FIGURE, WORK_FIGURE, write_force_figure, write_free_energy_figure,
    write_work_figure,
};
use crate::utils::progress::CliProgressHandler;
use smdpmf::{engine::progress::ProgressReporter, workflows};
use tracing::{error, info, warn};

pub fn run(args: PullArgs) -> Result<()> {
    let partial_config = PartialAppConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let job = partial_config.merge_pull(&args, &DefaultsConfig::default())?;
    let config = &job.core_config;

    std::fs::create_dir_all(&job.output_dir)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Analysing {} pulling condition(s)...",
        config.conditions.len()
    );
    info!("Invoking the core pulling workflow...");
    let report = workflows::pulling::run(config, &reporter)?;

    let completed: Vec<_> = report.completed().collect();
    for condition in &completed {
        let written = condition.export_csv(&job.output_dir)?;
        info!(
            "Wrote {} table(s) for condition '{}'",
            written.len(),
            condition.condition.name
        );
    }

    if completed.is_empty() {
        warn!("No condition completed; skipping figures.");
    } else {
        println!("Rendering figures into {}", job.output_dir.display());
        write_force_figure(&job.output_dir.join(FORCE_FIGURE), &completed)?;
        write_work_figure(&job.output_dir.join(WORK_FIGURE), &completed)?;
        write_free_energy_figure(&job.output_dir.join(FREE_ENERGY_FIGURE), &completed)?;
    }

    for condition in &completed {
        if let Some(dg) = condition.free_energy.raw.last_y() {
            println!(
                "  {:<24} {:>3} trajectories, ΔG at end of pull: {:.2} kJ/mol",
                condition.condition.name,
                condition.n_trajectories(),
                dg
            );
        }
    }

    let failed: Vec<_> = report.failures().collect();
    if failed.is_empty() {
        return Ok(());
    }
    for (name, e) in &failed {
        error!("Condition '{}' failed: {}", name, e);
        eprintln!("  ✗ {}: {}", name, e);
    }
    Err(CliError::ConditionsFailed {
        failed: failed.len(),
        total: report.outcomes.len(),
    })
}
