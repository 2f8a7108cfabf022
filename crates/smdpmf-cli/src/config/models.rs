use smdpmf::engine::config as core_config;
use std::path::PathBuf;

/// A fully resolved `pull` invocation.
pub struct PullJob {
    pub output_dir: PathBuf,
    pub core_config: core_config::PipelineConfig,
}

/// A fully resolved `sapt` invocation.
pub struct SaptJob {
    pub output_dir: PathBuf,
    pub core_config: core_config::SaptConfig,
}
