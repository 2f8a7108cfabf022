use crate::utils::parser::OptionalCount;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Najla Hosseini",
    version,
    about = "smdpmf - free-energy profiles from steered MD pulling runs (Jarzynski equality) and SAPT decomposition summaries.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Number of threads used to analyse conditions in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute force, work and free-energy profiles for every pulling condition.
    Pull(PullArgs),
    /// Tabulate and plot SAPT energy components per ion and conformation.
    Sapt(SaptArgs),
}

/// Arguments for the `pull` subcommand.
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Path to the configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Directory receiving CSV tables and SVG figures (created if missing).
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    // --- Physics Overrides ---
    /// Override the simulation temperature in K.
    #[arg(short = 'T', long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    // --- Input Overrides ---
    /// Override the maximum number of data rows read per file ('none' reads all rows).
    #[arg(long, value_name = "INT|none")]
    pub max_rows: Option<OptionalCount>,

    // --- Smoothing Overrides ---
    /// Override the moving-average window applied to raw force and distance.
    #[arg(long, value_name = "INT")]
    pub force_window: Option<usize>,

    /// Override the moving-average window applied to cumulative work curves.
    #[arg(long, value_name = "INT")]
    pub work_window: Option<usize>,

    /// Override the moving-average window applied to the free-energy curve ('none' disables it).
    #[arg(long, value_name = "INT|none")]
    pub free_energy_window: Option<OptionalCount>,

    /// Only analyse the named condition. Can be used multiple times.
    #[arg(long = "condition", value_name = "NAME")]
    pub conditions: Vec<String>,

    /// Stop at the first condition that fails instead of continuing with the others.
    #[arg(long)]
    pub fail_fast: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S smoothing.work-window=200
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `sapt` subcommand.
#[derive(Args, Debug)]
pub struct SaptArgs {
    /// Path to the configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Directory receiving the LaTeX table, CSV table and bar figure.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Override the SAPT summary CSV from the config file.
    #[arg(long, value_name = "PATH")]
    pub summary_csv: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Example: -S sapt.table-label=tab:sapt
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
