use smdpmf::core::io::discovery::UnindexedPolicy;
use smdpmf::core::numerics::jarzynski::{BOLTZMANN_KJ_MOL_K, DEFAULT_TEMPERATURE_K};

/// Values used for anything neither the config file nor the command line sets.
pub struct DefaultsConfig {
    pub boltzmann_constant: f64,
    pub temperature: f64,
    pub header_rows: usize,
    pub value_column: usize,
    pub max_rows: Option<usize>,
    pub force_pattern: String,
    pub distance_pattern: String,
    pub unindexed_files: UnindexedPolicy,
    pub force_window: usize,
    pub work_window: usize,
    pub free_energy_window: Option<usize>,
    /// Colours given to conditions without one, in configuration order.
    pub palette: Vec<&'static str>,
    pub sapt_summary_csv: String,
    pub sapt_caption: String,
    pub sapt_table_label: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            boltzmann_constant: BOLTZMANN_KJ_MOL_K,
            temperature: DEFAULT_TEMPERATURE_K,
            header_rows: 17,
            value_column: 1,
            max_rows: Some(79_000),
            force_pattern: "slow_pullf*.xvg".to_string(),
            distance_pattern: "slow_pullx*.xvg".to_string(),
            unindexed_files: UnindexedPolicy::Reject,
            force_window: 3000,
            work_window: 100,
            free_energy_window: None,
            palette: vec!["orange", "magenta", "purple", "teal", "crimson", "slateblue"],
            sapt_summary_csv: "sapt_summary.csv".to_string(),
            sapt_caption: "Symmetry-adapted perturbation theory (SAPT) energy decomposition for \
                           NNQQ--ion interactions. Individual rows correspond to conformations \
                           selected from steered molecular dynamics simulations, followed by \
                           the frame-averaged interaction energies for each ion."
                .to_string(),
            sapt_table_label: "tab:sapt_components_conformations".to_string(),
        }
    }
}
