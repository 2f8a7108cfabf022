use crate::error::{CliError, Result};
use serde::Deserialize;
use smdpmf::core::io::discovery::UnindexedPolicy;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialPhysicsConfig {
    pub boltzmann_constant: Option<f64>,
    pub temperature: Option<f64>,
}

/// `max-rows = 79000` or `max-rows = "none"`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RowLimit {
    Rows(usize),
    Keyword(String),
}

impl RowLimit {
    pub fn resolve(&self) -> Result<Option<usize>> {
        match self {
            RowLimit::Rows(n) => Ok(Some(*n)),
            RowLimit::Keyword(k) if k.eq_ignore_ascii_case("none") => Ok(None),
            RowLimit::Keyword(k) => Err(CliError::Config(format!(
                "`input.max-rows` must be an integer or \"none\", got \"{}\"",
                k
            ))),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PartialUnindexedPolicy {
    Reject,
    Skip,
}

impl From<PartialUnindexedPolicy> for UnindexedPolicy {
    fn from(p: PartialUnindexedPolicy) -> Self {
        match p {
            PartialUnindexedPolicy::Reject => UnindexedPolicy::Reject,
            PartialUnindexedPolicy::Skip => UnindexedPolicy::Skip,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialInputConfig {
    pub header_rows: Option<usize>,
    pub value_column: Option<usize>,
    pub max_rows: Option<RowLimit>,
    pub force_pattern: Option<String>,
    pub distance_pattern: Option<String>,
    pub unindexed_files: Option<PartialUnindexedPolicy>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialSmoothingConfig {
    pub force_window: Option<usize>,
    pub work_window: Option<usize>,
    pub free_energy_window: Option<usize>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialCondition {
    pub name: String,
    pub label: Option<String>,
    pub color: Option<String>,
    pub data_dir: PathBuf,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialSaptIon {
    pub ion: String,
    pub label: Option<String>,
    pub plot_label: Option<String>,
    pub distance_csv: Option<PathBuf>,
    pub distance_column: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialSaptConfig {
    pub summary_csv: Option<PathBuf>,
    pub caption: Option<String>,
    pub table_label: Option<String>,
    #[serde(default)]
    pub ions: Vec<PartialSaptIon>,
}

/// Contents of the TOML configuration file; every section is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    pub physics: Option<PartialPhysicsConfig>,
    pub input: Option<PartialInputConfig>,
    pub smoothing: Option<PartialSmoothingConfig>,
    #[serde(default)]
    pub conditions: Vec<PartialCondition>,
    pub sapt: Option<PartialSaptConfig>,
    /// Directory relative paths in the file are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_file_is_parsed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("smdpmf.toml");
        fs::write(
            &path,
            r##"
            [physics]
            temperature = 310.0

            [input]
            header-rows = 17
            max-rows = "none"
            unindexed-files = "skip"

            [smoothing]
            force-window = 2000
            free-energy-window = 9000

            [[conditions]]
            name = "NNQQ_Water"
            label = "NNQQ+Water"
            color = "orange"
            data-dir = "NNQQ_Water"

            [[conditions]]
            name = "NNQQ_WaterNaCl"
            data-dir = "/abs/NNQQ_WaterNaCl"

            [sapt]
            summary-csv = "sapt_summary.csv"

            [[sapt.ions]]
            ion = "Na"
            label = "Na$^+$"
            plot-label = "Na⁺"
            distance-csv = "na.csv"
            distance-column = "distance_COM_Na_A"
            "##,
        )
        .unwrap();

        let config = PartialAppConfig::from_file(&path).unwrap();
        assert_eq!(config.physics.as_ref().unwrap().temperature, Some(310.0));
        let input = config.input.as_ref().unwrap();
        assert_eq!(input.max_rows.as_ref().unwrap().resolve().unwrap(), None);
        assert_eq!(input.unindexed_files, Some(PartialUnindexedPolicy::Skip));
        assert_eq!(config.smoothing.as_ref().unwrap().free_energy_window, Some(9000));
        assert_eq!(config.conditions.len(), 2);
        assert_eq!(config.sapt.as_ref().unwrap().ions[0].ion, "Na");

        assert_eq!(
            config.resolve_path(&config.conditions[0].data_dir),
            dir.path().join("NNQQ_Water")
        );
        assert_eq!(
            config.resolve_path(&config.conditions[1].data_dir),
            PathBuf::from("/abs/NNQQ_WaterNaCl")
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[smoothing]\nforce-windw = 10\n").unwrap();

        let result = PartialAppConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn row_limit_keyword_must_be_none() {
        assert_eq!(RowLimit::Rows(5).resolve().unwrap(), Some(5));
        assert_eq!(RowLimit::Keyword("None".into()).resolve().unwrap(), None);
        assert!(RowLimit::Keyword("all".into()).resolve().is_err());
    }
}
