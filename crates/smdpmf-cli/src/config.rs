mod defaults;
mod file;
mod models;

pub use defaults::DefaultsConfig;
pub use file::PartialAppConfig;
pub use models::{PullJob, SaptJob};

use crate::cli::{PullArgs, SaptArgs};
use crate::error::{CliError, Result};
use crate::utils::parser::{self, OptionalCount};
use file::{PartialUnindexedPolicy, RowLimit};
use smdpmf::core::models::color::Rgb;
use smdpmf::core::models::condition::ConditionSpec;
use smdpmf::engine::config as core_config;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

impl PartialAppConfig {
    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value) =
                parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
            debug!("Applying --set {} = {}", key, value);

            match key {
                "physics.boltzmann-constant" => {
                    self.physics.get_or_insert_with(Default::default).boltzmann_constant =
                        Some(parse_value(key, value, "float")?);
                }
                "physics.temperature" => {
                    self.physics.get_or_insert_with(Default::default).temperature =
                        Some(parse_value(key, value, "float")?);
                }
                "input.header-rows" => {
                    self.input.get_or_insert_with(Default::default).header_rows =
                        Some(parse_value(key, value, "integer")?);
                }
                "input.value-column" => {
                    self.input.get_or_insert_with(Default::default).value_column =
                        Some(parse_value(key, value, "integer")?);
                }
                "input.max-rows" => {
                    let OptionalCount(rows) = parse_value(key, value, "row limit")?;
                    self.input.get_or_insert_with(Default::default).max_rows = Some(match rows {
                        Some(n) => RowLimit::Rows(n),
                        None => RowLimit::Keyword("none".to_string()),
                    });
                }
                "input.force-pattern" => {
                    self.input.get_or_insert_with(Default::default).force_pattern =
                        Some(value.to_string());
                }
                "input.distance-pattern" => {
                    self.input.get_or_insert_with(Default::default).distance_pattern =
                        Some(value.to_string());
                }
                "input.unindexed-files" => {
                    let policy = match value {
                        "reject" => PartialUnindexedPolicy::Reject,
                        "skip" => PartialUnindexedPolicy::Skip,
                        other => {
                            return Err(CliError::Config(format!(
                                "Invalid value for {}: '{}'. Expected 'reject' or 'skip'.",
                                key, other
                            )));
                        }
                    };
                    self.input.get_or_insert_with(Default::default).unindexed_files = Some(policy);
                }
                "smoothing.force-window" => {
                    self.smoothing.get_or_insert_with(Default::default).force_window =
                        Some(parse_value(key, value, "integer")?);
                }
                "smoothing.work-window" => {
                    self.smoothing.get_or_insert_with(Default::default).work_window =
                        Some(parse_value(key, value, "integer")?);
                }
                "smoothing.free-energy-window" => {
                    let OptionalCount(window) = parse_value(key, value, "window")?;
                    self.smoothing.get_or_insert_with(Default::default).free_energy_window = window;
                }
                "sapt.summary-csv" => {
                    self.sapt.get_or_insert_with(Default::default).summary_csv =
                        Some(PathBuf::from(value));
                }
                "sapt.caption" => {
                    self.sapt.get_or_insert_with(Default::default).caption =
                        Some(value.to_string());
                }
                "sapt.table-label" => {
                    self.sapt.get_or_insert_with(Default::default).table_label =
                        Some(value.to_string());
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn resolve_conditions(
        &self,
        selected: &[String],
        defaults: &DefaultsConfig,
    ) -> Result<Vec<ConditionSpec>> {
        if self.conditions.is_empty() {
            return Err(CliError::Config(
                "At least one [[conditions]] entry is required.".to_string(),
            ));
        }
        if let Some(unknown) = selected
            .iter()
            .find(|name| !self.conditions.iter().any(|c| &c.name == *name))
        {
            return Err(CliError::Argument(format!(
                "Unknown condition '{}' passed to --condition",
                unknown
            )));
        }

        let mut specs = Vec::new();
        for (i, condition) in self.conditions.iter().enumerate() {
            if !selected.is_empty() && !selected.contains(&condition.name) {
                continue;
            }
            let color_name = condition
                .color
                .as_deref()
                .unwrap_or(defaults.palette[i % defaults.palette.len()]);
            let color = Rgb::from_str(color_name).map_err(|e| {
                CliError::Config(format!("Condition '{}': {}", condition.name, e))
            })?;
            specs.push(ConditionSpec::new(
                condition.name.clone(),
                condition
                    .label
                    .clone()
                    .unwrap_or_else(|| condition.name.clone()),
                color,
                self.resolve_path(&condition.data_dir),
            ));
        }
        Ok(specs)
    }

    pub fn merge_pull(mut self, args: &PullArgs, defaults: &DefaultsConfig) -> Result<PullJob> {
        self.apply_set_values(&args.set_values)?;

        let conditions = self.resolve_conditions(&args.conditions, defaults)?;
        let physics = self.physics.take().unwrap_or_default();
        let input = self.input.take().unwrap_or_default();
        let smoothing = self.smoothing.take().unwrap_or_default();

        let max_rows = match (args.max_rows, &input.max_rows) {
            (Some(OptionalCount(rows)), _) => rows,
            (None, Some(limit)) => limit.resolve()?,
            (None, None) => defaults.max_rows,
        };
        let free_energy_window = match args.free_energy_window {
            Some(OptionalCount(window)) => window,
            None => smoothing.free_energy_window.or(defaults.free_energy_window),
        };

        let core_config = core_config::PipelineConfigBuilder::new()
            .boltzmann_constant(
                physics
                    .boltzmann_constant
                    .unwrap_or(defaults.boltzmann_constant),
            )
            .temperature(
                args.temperature
                    .or(physics.temperature)
                    .unwrap_or(defaults.temperature),
            )
            .header_rows(input.header_rows.unwrap_or(defaults.header_rows))
            .value_column(input.value_column.unwrap_or(defaults.value_column))
            .max_rows(max_rows)
            .force_pattern(
                input
                    .force_pattern
                    .unwrap_or_else(|| defaults.force_pattern.clone()),
            )
            .distance_pattern(
                input
                    .distance_pattern
                    .unwrap_or_else(|| defaults.distance_pattern.clone()),
            )
            .unindexed_files(
                input
                    .unindexed_files
                    .map(Into::into)
                    .unwrap_or(defaults.unindexed_files),
            )
            .force_window(
                args.force_window
                    .or(smoothing.force_window)
                    .unwrap_or(defaults.force_window),
            )
            .work_window(
                args.work_window
                    .or(smoothing.work_window)
                    .unwrap_or(defaults.work_window),
            )
            .free_energy_window(free_energy_window)
            .conditions(conditions)
            .fail_fast(args.fail_fast)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(PullJob {
            output_dir: args.output.clone(),
            core_config,
        })
    }

    pub fn merge_sapt(mut self, args: &SaptArgs, defaults: &DefaultsConfig) -> Result<SaptJob> {
        self.apply_set_values(&args.set_values)?;
        let sapt = self.sapt.take().unwrap_or_default();

        let summary_csv = match &args.summary_csv {
            Some(path) => path.clone(),
            None => self.resolve_path(
                sapt.summary_csv
                    .as_deref()
                    .unwrap_or_else(|| Path::new(&defaults.sapt_summary_csv)),
            ),
        };

        let mut builder = core_config::SaptConfigBuilder::new()
            .summary_csv(summary_csv)
            .caption(sapt.caption.unwrap_or_else(|| defaults.sapt_caption.clone()))
            .table_label(
                sapt.table_label
                    .unwrap_or_else(|| defaults.sapt_table_label.clone()),
            );

        for ion in sapt.ions {
            let table_label = ion.label.unwrap_or_else(|| ion.ion.clone());
            let plot_label = ion.plot_label.unwrap_or_else(|| table_label.clone());
            let mut group =
                core_config::SaptIonGroup::new(ion.ion.clone()).with_labels(table_label, plot_label);
            match (ion.distance_csv, ion.distance_column) {
                (Some(path), Some(column)) => {
                    group = group.with_distances(self.resolve_path(&path), column);
                }
                (None, None) => {}
                _ => {
                    return Err(CliError::Config(format!(
                        "Ion '{}': `distance-csv` and `distance-column` must be given together.",
                        ion.ion
                    )));
                }
            }
            builder = builder.group(group);
        }

        let core_config = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(SaptJob {
            output_dir: args.output.clone(),
            core_config,
        })
    }
}
