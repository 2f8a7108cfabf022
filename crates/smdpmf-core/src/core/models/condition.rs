use super::color::Rgb;
use std::path::PathBuf;

/// A group of pulling runs sharing one solvent/ion composition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSpec {
    /// Identifier used in file names and logs (e.g. `NNQQ_WaterNaCl`).
    pub name: String,
    /// Display label for figure panels (e.g. `NNQQ+Water_NaCl`).
    pub label: String,
    pub color: Rgb,
    /// Directory holding this condition's force and distance files.
    pub data_dir: PathBuf,
}

impl ConditionSpec {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        color: Rgb,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            color,
            data_dir: data_dir.into(),
        }
    }
}
