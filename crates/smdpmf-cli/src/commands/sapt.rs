use crate::cli::SaptArgs;
use crate::config::{DefaultsConfig, PartialAppConfig};
use crate::error::Result;
use crate::render::sapt::{BARS_FIGURE, write_component_bars};
use crate::utils::progress::CliProgressHandler;
use smdpmf::{engine::progress::ProgressReporter, workflows};
use tracing::info;

pub fn run(args: SaptArgs) -> Result<()> {
    let partial_config = PartialAppConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let job = partial_config.merge_sapt(&args, &DefaultsConfig::default())?;

    std::fs::create_dir_all(&job.output_dir)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Reading SAPT summary from {:?}", &job.core_config.summary_csv);
    let report = workflows::sapt::run(&job.core_config, &reporter)?;

    for path in report.write_tables(&job.output_dir)? {
        println!("✓ Table written to: {}", path.display());
    }

    let figure = job.output_dir.join(BARS_FIGURE);
    write_component_bars(&figure, &report)?;
    println!("✓ Figure written to: {}", figure.display());

    for group in &report.groups {
        println!(
            "  {:<6} {:>2} conformation(s), mean total SAPT: {:.2} kJ/mol",
            group.ion,
            group.conformations.len(),
            group.average.total
        );
    }
    Ok(())
}
