use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::discovery::DiscoveryError;
use crate::core::io::export::ExportError;
use crate::core::io::sapt_csv::SaptError;
use crate::core::io::xvg::XvgError;
use crate::core::numerics::NumericsError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Failed to read series: {0}")]
    Xvg(#[from] XvgError),

    #[error("Numerical error: {0}")]
    Numerics(#[from] NumericsError),

    #[error(
        "Trajectory {index} of condition '{condition}' has {force_len} force samples but {distance_len} distance samples"
    )]
    MismatchedPair {
        condition: String,
        index: u64,
        force_len: usize,
        distance_len: usize,
    },

    #[error("Condition '{0}' has no trajectories")]
    EmptyEnsemble(String),

    #[error("SAPT summary failed: {0}")]
    Sapt(#[from] SaptError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("Condition '{name}' failed: {source}")]
    ConditionFailed {
        name: String,
        #[source]
        source: Box<EngineError>,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
