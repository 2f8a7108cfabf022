use crate::core::io::discovery::{FilePattern, UnindexedPolicy};
use crate::core::io::xvg::ColumnSpec;
use crate::core::models::condition::ConditionSpec;
use crate::core::numerics::jarzynski::Thermodynamics;
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },

    #[error("Condition '{0}' is configured more than once")]
    DuplicateCondition(String),
}

/// How trajectory files are found and read inside a condition directory.
#[derive(Debug, Clone)]
pub struct InputConfig {
    pub columns: ColumnSpec,
    pub force_pattern: FilePattern,
    pub distance_pattern: FilePattern,
    pub unindexed: UnindexedPolicy,
}

/// Moving-average windows, each applied at a different stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothingConfig {
    /// Raw force and distance series.
    pub force_window: usize,
    /// Cumulative work curves (display and maximum work only).
    pub work_window: usize,
    /// Final free-energy curve; `None` leaves it unsmoothed.
    pub free_energy_window: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub thermodynamics: Thermodynamics,
    pub input: InputConfig,
    pub smoothing: SmoothingConfig,
    pub conditions: Vec<ConditionSpec>,
    /// Abort the whole run on the first failed condition.
    pub fail_fast: bool,
}

#[derive(Default)]
pub struct PipelineConfigBuilder {
    boltzmann_constant: Option<f64>,
    temperature: Option<f64>,
    header_rows: Option<usize>,
    value_column: Option<usize>,
    max_rows: Option<Option<usize>>,
    force_pattern: Option<String>,
    distance_pattern: Option<String>,
    unindexed: UnindexedPolicy,
    force_window: Option<usize>,
    work_window: Option<usize>,
    free_energy_window: Option<usize>,
    conditions: Vec<ConditionSpec>,
    fail_fast: bool,
}

fn positive_window(parameter: &'static str, window: usize) -> Result<usize, ConfigError> {
    if window == 0 {
        return Err(ConfigError::InvalidValue {
            parameter,
            reason: "window must be at least 1".to_string(),
        });
    }
    Ok(window)
}

fn pattern(parameter: &'static str, glob: String) -> Result<FilePattern, ConfigError> {
    FilePattern::new(&glob).map_err(|e| ConfigError::InvalidValue {
        parameter,
        reason: e.to_string(),
    })
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boltzmann_constant(mut self, k: f64) -> Self {
        self.boltzmann_constant = Some(k);
        self
    }
    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }
    pub fn header_rows(mut self, rows: usize) -> Self {
        self.header_rows = Some(rows);
        self
    }
    pub fn value_column(mut self, column: usize) -> Self {
        self.value_column = Some(column);
        self
    }
    /// `None` reads every row.
    pub fn max_rows(mut self, rows: Option<usize>) -> Self {
        self.max_rows = Some(rows);
        self
    }
    pub fn force_pattern(mut self, glob: impl Into<String>) -> Self {
        self.force_pattern = Some(glob.into());
        self
    }
    pub fn distance_pattern(mut self, glob: impl Into<String>) -> Self {
        self.distance_pattern = Some(glob.into());
        self
    }
    pub fn unindexed_files(mut self, policy: UnindexedPolicy) -> Self {
        self.unindexed = policy;
        self
    }
    pub fn force_window(mut self, window: usize) -> Self {
        self.force_window = Some(window);
        self
    }
    pub fn work_window(mut self, window: usize) -> Self {
        self.work_window = Some(window);
        self
    }
    pub fn free_energy_window(mut self, window: Option<usize>) -> Self {
        self.free_energy_window = window;
        self
    }
    pub fn condition(mut self, condition: ConditionSpec) -> Self {
        self.conditions.push(condition);
        self
    }
    pub fn conditions(mut self, conditions: impl IntoIterator<Item = ConditionSpec>) -> Self {
        self.conditions.extend(conditions);
        self
    }
    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    pub fn build(self) -> Result<PipelineConfig, ConfigError> {
        let thermodynamics = Thermodynamics::new(
            self.boltzmann_constant
                .ok_or(ConfigError::MissingParameter("boltzmann_constant"))?,
            self.temperature
                .ok_or(ConfigError::MissingParameter("temperature"))?,
        );
        thermodynamics
            .validated_kt()
            .map_err(|e| ConfigError::InvalidValue {
                parameter: "temperature",
                reason: e.to_string(),
            })?;

        let max_rows = self
            .max_rows
            .ok_or(ConfigError::MissingParameter("max_rows"))?;
        if max_rows == Some(0) {
            return Err(ConfigError::InvalidValue {
                parameter: "max_rows",
                reason: "at least one row must be read".to_string(),
            });
        }

        let input = InputConfig {
            columns: ColumnSpec {
                header_rows: self
                    .header_rows
                    .ok_or(ConfigError::MissingParameter("header_rows"))?,
                column: self
                    .value_column
                    .ok_or(ConfigError::MissingParameter("value_column"))?,
                max_rows,
            },
            force_pattern: pattern(
                "force_pattern",
                self.force_pattern
                    .ok_or(ConfigError::MissingParameter("force_pattern"))?,
            )?,
            distance_pattern: pattern(
                "distance_pattern",
                self.distance_pattern
                    .ok_or(ConfigError::MissingParameter("distance_pattern"))?,
            )?,
            unindexed: self.unindexed,
        };

        let smoothing = SmoothingConfig {
            force_window: positive_window(
                "force_window",
                self.force_window
                    .ok_or(ConfigError::MissingParameter("force_window"))?,
            )?,
            work_window: positive_window(
                "work_window",
                self.work_window
                    .ok_or(ConfigError::MissingParameter("work_window"))?,
            )?,
            free_energy_window: self
                .free_energy_window
                .map(|w| positive_window("free_energy_window", w))
                .transpose()?,
        };

        if self.conditions.is_empty() {
            return Err(ConfigError::MissingParameter("conditions"));
        }
        let mut seen = HashSet::new();
        for condition in &self.conditions {
            if !seen.insert(condition.name.as_str()) {
                return Err(ConfigError::DuplicateCondition(condition.name.clone()));
            }
        }

        Ok(PipelineConfig {
            thermodynamics,
            input,
            smoothing,
            conditions: self.conditions,
            fail_fast: self.fail_fast,
        })
    }
}

/// Where the centre-of-mass distance of each frame is tabulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable {
    pub path: PathBuf,
    pub column: String,
}

/// One ion species of the SAPT summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaptIonGroup {
    /// Value of the `Ion` column selecting this group's rows.
    pub ion: String,
    pub table_label: String,
    pub plot_label: String,
    pub distances: Option<DistanceTable>,
}

impl SaptIonGroup {
    pub fn new(ion: impl Into<String>) -> Self {
        let ion = ion.into();
        Self {
            table_label: ion.clone(),
            plot_label: ion.clone(),
            ion,
            distances: None,
        }
    }

    pub fn with_labels(mut self, table: impl Into<String>, plot: impl Into<String>) -> Self {
        self.table_label = table.into();
        self.plot_label = plot.into();
        self
    }

    pub fn with_distances(mut self, path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        self.distances = Some(DistanceTable {
            path: path.into(),
            column: column.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaptConfig {
    pub summary_csv: PathBuf,
    pub groups: Vec<SaptIonGroup>,
    pub caption: String,
    pub table_label: String,
}

#[derive(Default)]
pub struct SaptConfigBuilder {
    summary_csv: Option<PathBuf>,
    groups: Vec<SaptIonGroup>,
    caption: Option<String>,
    table_label: Option<String>,
}

impl SaptConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary_csv(mut self, path: PathBuf) -> Self {
        self.summary_csv = Some(path);
        self
    }
    pub fn group(mut self, group: SaptIonGroup) -> Self {
        self.groups.push(group);
        self
    }
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
    pub fn table_label(mut self, label: impl Into<String>) -> Self {
        self.table_label = Some(label.into());
        self
    }

    pub fn build(self) -> Result<SaptConfig, ConfigError> {
        if self.groups.is_empty() {
            return Err(ConfigError::MissingParameter("ions"));
        }
        let mut seen = HashSet::new();
        for group in &self.groups {
            if !seen.insert(group.ion.as_str()) {
                return Err(ConfigError::InvalidValue {
                    parameter: "ions",
                    reason: format!("ion '{}' is listed more than once", group.ion),
                });
            }
        }
        Ok(SaptConfig {
            summary_csv: self
                .summary_csv
                .ok_or(ConfigError::MissingParameter("summary_csv"))?,
            groups: self.groups,
            caption: self
                .caption
                .ok_or(ConfigError::MissingParameter("caption"))?,
            table_label: self
                .table_label
                .ok_or(ConfigError::MissingParameter("table_label"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::color::Rgb;

    fn water() -> ConditionSpec {
        ConditionSpec::new("water", "NNQQ+Water", Rgb::new(255, 165, 0), "/data/water")
    }

    fn complete() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
            .boltzmann_constant(0.008314)
            .temperature(298.15)
            .header_rows(17)
            .value_column(1)
            .max_rows(Some(79000))
            .force_pattern("slow_pullf*.xvg")
            .distance_pattern("slow_pullx*.xvg")
            .force_window(3000)
            .work_window(100)
            .condition(water())
    }

    #[test]
    fn complete_builder_produces_config() {
        let config = complete().build().unwrap();
        assert_eq!(config.input.columns.header_rows, 17);
        assert_eq!(config.input.columns.max_rows, Some(79000));
        assert_eq!(config.input.unindexed, UnindexedPolicy::Reject);
        assert_eq!(config.smoothing.free_energy_window, None);
        assert!((config.thermodynamics.kt() - 2.4788191).abs() < 1e-6);
        assert!(!config.fail_fast);
        assert!(config.input.force_pattern.matches("slow_pullf3.xvg"));
    }

    #[test]
    fn missing_parameter_is_named() {
        let result = PipelineConfigBuilder::new()
            .boltzmann_constant(0.008314)
            .build();
        assert_eq!(result.unwrap_err(), ConfigError::MissingParameter("temperature"));
    }

    #[test]
    fn conditions_are_required() {
        let result = PipelineConfigBuilder::new()
            .boltzmann_constant(0.008314)
            .temperature(298.15)
            .header_rows(17)
            .value_column(1)
            .max_rows(None)
            .force_pattern("f*")
            .distance_pattern("x*")
            .force_window(3)
            .work_window(1)
            .build();
        assert_eq!(result.unwrap_err(), ConfigError::MissingParameter("conditions"));
    }

    #[test]
    fn non_positive_temperature_is_rejected() {
        let result = complete().temperature(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "temperature",
                ..
            })
        ));
    }

    #[test]
    fn zero_windows_are_rejected() {
        assert!(matches!(
            complete().force_window(0).build(),
            Err(ConfigError::InvalidValue {
                parameter: "force_window",
                ..
            })
        ));
        assert!(matches!(
            complete().free_energy_window(Some(0)).build(),
            Err(ConfigError::InvalidValue {
                parameter: "free_energy_window",
                ..
            })
        ));
    }

    #[test]
    fn duplicate_condition_names_are_rejected() {
        let result = complete().condition(water()).build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::DuplicateCondition("water".to_string())
        );
    }

    #[test]
    fn sapt_builder_requires_groups_and_paths() {
        assert_eq!(
            SaptConfigBuilder::new().build().unwrap_err(),
            ConfigError::MissingParameter("ions")
        );

        let config = SaptConfigBuilder::new()
            .summary_csv(PathBuf::from("sapt_summary.csv"))
            .group(SaptIonGroup::new("K").with_labels("K$^+$", "K⁺"))
            .group(SaptIonGroup::new("Na").with_distances("na.csv", "distance_COM_Na_A"))
            .caption("SAPT terms")
            .table_label("tab:sapt")
            .build()
            .unwrap();
        assert_eq!(config.groups[0].table_label, "K$^+$");
        assert_eq!(config.groups[1].plot_label, "Na");
        assert_eq!(
            config.groups[1].distances.as_ref().map(|d| d.column.as_str()),
            Some("distance_COM_Na_A")
        );
    }

    #[test]
    fn sapt_builder_rejects_repeated_ions() {
        let result = SaptConfigBuilder::new()
            .summary_csv(PathBuf::from("s.csv"))
            .group(SaptIonGroup::new("K"))
            .group(SaptIonGroup::new("K"))
            .caption("c")
            .table_label("l")
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { parameter: "ions", .. })));
    }
}
